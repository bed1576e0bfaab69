//! Personnel leaderboard ordering.
//!
//! Designated key-personnel names sort strictly ahead of everyone else,
//! in their given relative order; the rest sort by interactions
//! descending. The sort is stable and applies no secondary key — equal
//! interaction counts keep input order by design.

use rekap_common::PersonnelAggregate;

/// Canonical leaderboard sort over a flattened personnel list.
pub fn rank_personnel(
    personnel: &[PersonnelAggregate],
    key_names: &[String],
) -> Vec<PersonnelAggregate> {
    let mut ranked: Vec<PersonnelAggregate> = Vec::with_capacity(personnel.len());
    let mut rest: Vec<PersonnelAggregate> = Vec::new();

    for person in personnel {
        if is_key_personnel(&person.nama, key_names) {
            ranked.push(person.clone());
        } else {
            rest.push(person.clone());
        }
    }

    rest.sort_by(|a, b| b.interactions.cmp(&a.interactions));
    ranked.extend(rest);
    ranked
}

/// Case-insensitive substring match against the designated name set.
fn is_key_personnel(nama: &str, key_names: &[String]) -> bool {
    let haystack = nama.to_lowercase();
    key_names.iter().any(|name| {
        let needle = name.trim().to_lowercase();
        !needle.is_empty() && haystack.contains(&needle)
    })
}
