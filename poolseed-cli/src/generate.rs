/// Synthetic roster generation for trying out pool assignment.
///
/// Produces rows in the same four-field shape the loader reads. Non-U ranks
/// get a sub-level between 1 and 15.
use std::io::Write;

use rand::Rng;

pub const DEFAULT_ROWS: usize = 50;

const LAST_NAMES: [&str; 24] = [
    "Abbott", "Baker", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Hughes",
    "Ivanova", "Jensen", "Kowalski", "Larsen", "Moreau", "Novak", "Okafor", "Petrov",
    "Quinn", "Rossi", "Schmidt", "Tanaka", "Underwood", "Varga", "Weber", "Zhang",
];

const FIRST_NAMES: [&str; 20] = [
    "Ada", "Ben", "Chloe", "Dmitri", "Elena", "Felix", "Grace", "Hugo", "Iris", "Jonas",
    "Kira", "Liam", "Maya", "Nico", "Olga", "Pavel", "Rosa", "Sami", "Tess", "Yuri",
];

const CLUB_WORDS: [&str; 10] = [
    "riposte", "lunge", "parry", "guard", "piste", "tempo", "salute", "bout", "blade", "touch",
];

const GRADE_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'U'];

/// One generated row: last name, first name, club, rank notation.
pub type Row = [String; 4];

fn random_rank(rng: &mut impl Rng) -> String {
    let letter = GRADE_LETTERS[rng.random_range(0..GRADE_LETTERS.len())];
    if letter == 'U' {
        letter.to_string()
    } else {
        format!("{letter}{}", rng.random_range(1..=15))
    }
}

pub fn generate_rows(count: usize, rng: &mut impl Rng) -> Vec<Row> {
    (0..count)
        .map(|_| {
            [
                LAST_NAMES[rng.random_range(0..LAST_NAMES.len())].to_string(),
                FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())].to_string(),
                CLUB_WORDS[rng.random_range(0..CLUB_WORDS.len())].to_uppercase(),
                random_rank(rng),
            ]
        })
        .collect()
}

pub fn write_rows<W: Write>(writer: W, rows: &[Row]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
