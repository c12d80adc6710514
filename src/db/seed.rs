//! Demo data for initial database setup.
//!
//! Only runs when both the groups and songs tables are empty, so
//! restarting a populated instance never duplicates or cross-links rows.
//! Generated ids are taken from RETURNING, never assumed.

use sqlx::PgPool;
use tracing::info;

use crate::error::Error;

/// Multi-verse lyric text used for the demo Queen entry; handy for
/// trying out the paginated lyrics endpoint.
pub const BOHEMIAN_RHAPSODY: &str = "Is this the real life? Is this just fantasy?\n\
Caught in a landslide, no escape from reality\n\
Open your eyes, look up to the skies and see\n\
\n\
Mama, just killed a man\n\
Put a gun against his head, pulled my trigger, now he's dead\n\
Mama, life had just begun\n\
\n\
Too late, my time has come\n\
Sends shivers down my spine, body's aching all the time\n\
Goodbye, everybody, I've got to go\n\
\n\
So you think you can stone me and spit in my eye?\n\
So you think you can love me and leave me to die?\n\
\n\
Nothing really matters, anyone can see\n\
Nothing really matters to me\n\
Any way the wind blows";

const DEMO_GROUPS: &[&str] = &["Metallica", "Nirvana", "Queen"];

/// A demo song, attached to its group by name; the numeric ids are
/// resolved at insert time.
struct DemoSong {
    group: &'static str,
    name: &'static str,
    release_date: &'static str,
    lyrics: &'static str,
    link: &'static str,
}

const DEMO_SONGS: &[DemoSong] = &[
    DemoSong {
        group: "Metallica",
        name: "Enter Sandman",
        release_date: "1991-07-29",
        lyrics: "Say your prayers, little one...",
        link: "https://example.com/enter-sandman",
    },
    DemoSong {
        group: "Nirvana",
        name: "Smells Like Teen Spirit",
        release_date: "1991-09-10",
        lyrics: "Load up on guns, bring your friends...",
        link: "https://example.com/smells-like-teen-spirit",
    },
    DemoSong {
        group: "Queen",
        name: "Bohemian Rhapsody",
        release_date: "1975-10-31",
        lyrics: BOHEMIAN_RHAPSODY,
        link: "https://example.com/bohemian-rhapsody",
    },
];

/// Insert demo groups, songs and details when the database is empty.
pub async fn seed_if_empty(pool: &PgPool) -> Result<(), Error> {
    let (is_empty,): (bool,) = sqlx::query_as(
        "SELECT NOT EXISTS (SELECT 1 FROM songs) AND NOT EXISTS (SELECT 1 FROM groups)",
    )
    .fetch_one(pool)
    .await?;

    if !is_empty {
        info!("Database already populated, skipping demo data");
        return Ok(());
    }

    info!("Database is empty, inserting demo data");

    let mut tx = pool.begin().await?;

    for group in DEMO_GROUPS {
        let (group_id,): (i32,) =
            sqlx::query_as("INSERT INTO groups (name) VALUES ($1) RETURNING id")
                .bind(group)
                .fetch_one(&mut *tx)
                .await?;

        for song in DEMO_SONGS.iter().filter(|s| s.group == *group) {
            let (song_id,): (i32,) =
                sqlx::query_as("INSERT INTO songs (name, group_id) VALUES ($1, $2) RETURNING id")
                    .bind(song.name)
                    .bind(group_id)
                    .fetch_one(&mut *tx)
                    .await?;

            sqlx::query(
                "INSERT INTO song_details (song_id, release_date, lyrics, link) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(song_id)
            .bind(song.release_date)
            .bind(song.lyrics)
            .bind(song.link)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    info!("Demo data inserted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_demo_song_names_a_seeded_group() {
        // Songs attach to groups by name at insert time; a song naming
        // a group outside DEMO_GROUPS would silently never be inserted.
        for song in DEMO_SONGS {
            assert!(
                DEMO_GROUPS.contains(&song.group),
                "demo song '{}' references unknown group '{}'",
                song.name,
                song.group
            );
        }
    }

    #[test]
    fn every_seeded_group_gets_a_song() {
        for group in DEMO_GROUPS {
            assert!(
                DEMO_SONGS.iter().any(|s| s.group == *group),
                "demo group '{}' has no songs",
                group
            );
        }
    }

    #[test]
    fn queen_demo_lyrics_span_multiple_verses() {
        let verses = crate::db::lyrics::split_verses(BOHEMIAN_RHAPSODY);
        assert!(verses.len() > 1);
    }
}
