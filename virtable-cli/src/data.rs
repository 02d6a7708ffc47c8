//! Generated demo rows.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use virtable_lib::Column;
use virtable_lib::model::{Person, Status, Value};

const FIRST_NAMES: &[&str] = &[
    "Ada",
    "Anna Maria",
    "Bob",
    "Chidi",
    "Dmitri",
    "Elif",
    "Jean Baptiste",
    "Joanne",
    "Kenji",
    "Lena",
    "María José",
    "Noor",
    "Oskar",
    "Priya",
    "Sven",
    "Zoë",
];

const LAST_NAMES: &[&str] = &[
    "Abara",
    "Berg",
    "da Silva",
    "Fischer",
    "Haddad",
    "Kowalski",
    "Nakamura",
    "Okafor",
    "Petrov",
    "Rossi",
    "Schwarzenegger",
    "van der Berg",
    "Yılmaz",
];

const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;

/// Generate `count` people with sequential ids.
///
/// Creation times fall within the year before `now`.
pub fn make_data<R: Rng>(count: usize, rng: &mut R, now: DateTime<Utc>) -> Vec<Person> {
    (0..count)
        .map(|i| Person {
            id: i as u64,
            first_name: pick(rng, FIRST_NAMES),
            last_name: pick(rng, LAST_NAMES),
            age: rng.random_range(0..40),
            visits: rng.random_range(0..1000),
            status: Status::ALL[rng.random_range(0..Status::ALL.len())],
            progress: rng.random_range(0..100),
            created_at: now - Duration::seconds(rng.random_range(0..SECONDS_PER_YEAR)),
        })
        .collect()
}

fn pick<R: Rng>(rng: &mut R, pool: &[&str]) -> String {
    pool[rng.random_range(0..pool.len())].to_string()
}

/// Text shown in a cell.
///
/// Timestamps show to the minute; filtering and sorting still see the full
/// `DateTime`.
pub fn cell(column: &Column<Person>, person: &Person) -> String {
    match column.read(person) {
        Value::DateTime(at) => at.format("%Y-%m-%d %H:%M").to_string(),
        value => value.to_string(),
    }
}
