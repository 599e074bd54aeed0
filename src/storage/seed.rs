//! Sample authors and courses loaded at startup when `seed` is enabled

use crate::core::repository::CourseLibraryRepository;
use crate::entities::{Author, Course};
use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use uuid::{Uuid, uuid};

fn born(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn author(id: Uuid, first: &str, last: &str, date_of_birth: DateTime<Utc>, category: &str) -> Author {
    Author {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        date_of_birth,
        date_of_death: None,
        main_category: category.to_string(),
    }
}

fn course(id: Uuid, author_id: Uuid, title: &str, description: &str) -> Course {
    Course {
        id,
        author_id,
        title: title.to_string(),
        description: Some(description.to_string()),
    }
}

/// Authors with fixed ids, each with its courses
pub fn sample_data() -> Vec<(Author, Vec<Course>)> {
    let berry = uuid!("d28888e9-2ba9-473a-a40f-e38cb54f9b35");
    let nancy = uuid!("da2fd609-d754-4feb-8acd-c4f9ff13ba96");
    let eli = uuid!("2902b665-1190-4c70-9915-b9c2d7680450");
    let arnold = uuid!("102b566b-ba1f-404c-b2df-e2cde39ade09");
    let seabury = uuid!("5b3621c0-7b12-4e80-9c8b-3398cba7ee05");
    let rutherford = uuid!("2aadd2df-7caf-45ab-9355-7f6332985a87");

    vec![
        (
            author(berry, "Berry", "Griffin Beak Eldritch", born(1650, 7, 23), "Ships"),
            vec![
                course(
                    uuid!("5b1c2b4d-48c7-402a-80c3-cc796ad49c6b"),
                    berry,
                    "Commandeering a Ship Without Getting Caught",
                    "Commandeering a ship in rough waters isn't easy. Learn how to do it without getting caught.",
                ),
                course(
                    uuid!("d8663e5e-7494-4f81-8739-6e0de1bea7ee"),
                    berry,
                    "Overthrowing Mutiny",
                    "In this course, the author provides tips to avoid, or, if needed, overthrow pirate mutiny.",
                ),
            ],
        ),
        (
            author(nancy, "Nancy", "Swashbuckler Rye", born(1668, 5, 21), "Rum"),
            vec![course(
                uuid!("d173e20d-159e-4127-9ce9-b0ac2564ad97"),
                nancy,
                "Avoiding Brawls While Drinking as Much Rum as You Desire",
                "Every good pirate loves rum, but it also has a tendency to get you into trouble.",
            )],
        ),
        (
            author(eli, "Eli", "Ivory Bones Sweet", born(1701, 12, 16), "Singing"),
            vec![course(
                uuid!("40ff5488-fdab-45b5-bc3a-14302d59869a"),
                eli,
                "Singalong Pirate Hits",
                "In this course you'll learn how to sing all-time favourite pirate songs without sounding like you actually know the words or how to hold a note.",
            )],
        ),
        (
            author(arnold, "Arnold", "The Unseen Stafford", born(1702, 3, 6), "Singing"),
            Vec::new(),
        ),
        (
            author(seabury, "Seabury", "Toxic Reyson", born(1690, 11, 23), "Maps"),
            Vec::new(),
        ),
        (
            author(rutherford, "Rutherford", "Fearless Faulkner", born(1723, 4, 5), "General debauchery"),
            Vec::new(),
        ),
    ]
}

/// Stage and commit the sample data
pub async fn seed_repository(repository: &dyn CourseLibraryRepository) -> Result<usize> {
    let data = sample_data();
    let count = data.len();
    for (author, courses) in data {
        repository.add_author(author, courses).await?;
    }
    repository.save().await?;
    tracing::info!(authors = count, "seeded sample data");
    Ok(count)
}
