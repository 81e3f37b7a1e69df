//! Normalize a raw catalog dump into per-registry profile files.
//! Reads data/catalog/items.json (or the path given as the first argument),
//! writes data/normalized/{characters,weapons,mods}.json plus an index.json
//! with counts and the normalization date. Run after refreshing the dump.

use std::env;
use std::fs;
use std::process;

use arsenal::catalog::item::{load_items, DEFAULT_CATALOG_PATH};
use arsenal::catalog::normalize::{
    build_character_profiles, build_modifier_profiles, build_weapon_profiles,
};

const OUT_DIR: &str = "data/normalized";

fn main() {
    let args: Vec<String> = env::args().collect();
    let input_path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or(DEFAULT_CATALOG_PATH);

    let Some(items) = load_items(input_path) else {
        eprintln!("could not read catalog items from '{input_path}'");
        process::exit(1);
    };

    let characters = build_character_profiles(&items);
    let weapons = build_weapon_profiles(&items);
    let mods = build_modifier_profiles(&items);

    if let Err(err) = fs::create_dir_all(OUT_DIR) {
        eprintln!("could not create '{OUT_DIR}': {err}");
        process::exit(1);
    }

    let outputs: [(&str, serde_json::Result<String>); 4] = [
        ("characters.json", serde_json::to_string_pretty(&characters)),
        ("weapons.json", serde_json::to_string_pretty(&weapons)),
        ("mods.json", serde_json::to_string_pretty(&mods)),
        (
            "index.json",
            serde_json::to_string_pretty(&serde_json::json!({
                "source_path": input_path,
                "normalized_at": chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                "characters": characters.len(),
                "weapons": weapons.len(),
                "mods": mods.len(),
            })),
        ),
    ];

    for (file_name, payload) in outputs {
        let payload = match payload {
            Ok(payload) => payload,
            Err(err) => {
                eprintln!("could not serialize {file_name}: {err}");
                process::exit(1);
            }
        };
        let out_path = format!("{OUT_DIR}/{file_name}");
        if let Err(err) = fs::write(&out_path, payload) {
            eprintln!("could not write '{out_path}': {err}");
            process::exit(1);
        }
    }

    println!(
        "normalized {} characters, {} weapons, {} mods -> {OUT_DIR}/",
        characters.len(),
        weapons.len(),
        mods.len()
    );
}
