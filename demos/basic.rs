//! Building, editing, writing and re-reading a KeyValues tree.
//!
//! Run with: cargo run --example basic

use keyvalues::{from_str, to_string, KeyValues, StringifyOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let kv = KeyValues::new("kv");

    kv.insert("name", "Test Model")?;
    println!("kv[\"name\"] = {}", kv.get_str("name").unwrap_or_default());
    kv.insert("filename", "test.mdl")?;
    println!("kv[\"filename\"] = {}", kv.get_str("filename").unwrap_or_default());

    println!("len(kv) = {}", kv.len());
    println!("\"name\" in kv = {}", kv.contains_key("name"));
    println!("\"uncontained_key\" in kv = {}", kv.contains_key("uncontained_key"));

    kv.remove("name");
    println!("Deleted kv[\"name\"]");

    println!("kv items:");
    for (key, value) in &kv {
        println!("  kv[{}] = {}", key, value);
    }

    let kv_a = KeyValues::new("kv_a");
    kv_a.insert("name", "kv_a")?;

    let kv_b = KeyValues::new("kv_b");
    kv_b.insert("name", "kv_b")?;
    kv_a.insert("entry", &kv_b)?;

    let kv_c = KeyValues::new("kv_c");
    kv_c.insert("name", "kv_c")?;
    kv_b.insert("another", &kv_c)?;

    let text = to_string(&kv_a);
    println!("\n{}\n", text);
    println!("{}\n", kv_a.stringify(&StringifyOptions::inline()));

    let reloaded = from_str(&text)?;
    println!("Reloaded root: {}", reloaded.name());
    println!("✓ Round-trip successful");

    Ok(())
}
