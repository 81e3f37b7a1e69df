//! Export ranked search results as CSV for spreadsheet comparison.
//! One row per loadout, modifier lists joined with '|'.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::optimizer::loadout::Loadout;

const HEADER: [&str; 10] = [
    "rank",
    "score",
    "character",
    "primary_weapon",
    "secondary_weapon",
    "melee_weapon",
    "character_mods",
    "primary_mods",
    "secondary_mods",
    "melee_mods",
];

pub fn write_ranked_csv<W: Write>(writer: W, loadouts: &[Loadout]) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER)?;
    for (index, loadout) in loadouts.iter().enumerate() {
        out.write_record([
            (index + 1).to_string(),
            loadout.score.to_string(),
            loadout.character.clone(),
            loadout.primary_weapon.clone(),
            loadout.secondary_weapon.clone(),
            loadout.melee_weapon.clone(),
            loadout.character_mods.join("|"),
            loadout.primary_mods.join("|"),
            loadout.secondary_mods.join("|"),
            loadout.melee_mods.join("|"),
        ])?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_ranked_csv_path(path: impl AsRef<Path>, loadouts: &[Loadout]) -> Result<(), csv::Error> {
    let file = File::create(path)?;
    write_ranked_csv(file, loadouts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_header_and_one_row_per_loadout() {
        let loadouts = vec![Loadout {
            character: "Saryn".to_string(),
            primary_weapon: "Braton".to_string(),
            secondary_weapon: "Lato".to_string(),
            melee_weapon: "Skana".to_string(),
            character_mods: vec!["Vitality".to_string(), "Redirection".to_string()],
            primary_mods: vec!["Serration".to_string()],
            secondary_mods: vec![],
            melee_mods: vec![],
            score: 1234,
        }];

        let mut buffer = Vec::new();
        write_ranked_csv(&mut buffer, &loadouts).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("rank,score,character"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("1,1234,Saryn"));
        assert!(row.contains("Vitality|Redirection"));
        assert_eq!(lines.next(), None);
    }
}
