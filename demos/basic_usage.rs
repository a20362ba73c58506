use anyhow::Result;
use fsq::query::Attribute;

fn main() -> Result<()> {
    // Build a scratch tree to query
    let dir = std::path::Path::new("demo_data");
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir.join("src"))?;
    std::fs::write(dir.join("src/main.rs"), "fn main() {}\n")?;
    std::fs::write(dir.join("README.md"), "# demo\n")?;
    std::fs::write(dir.join("notes.txt"), "scratch notes\n")?;
    println!("Created scratch tree at {dir:?}");

    // Parse a query against it
    let input = "SELECT name, size FROM demo_data WHERE name LIKE %.rs OR name LIKE %.md";
    let mut query = fsq::parser::run(input)?;
    println!("Parsed: {query}");

    // Execute and walk the rows in SELECT order
    let rows = query.execute()?;
    println!("Matched {} entries:", rows.len());
    for row in &rows {
        println!(
            "  {}\t{}",
            row[&Attribute::Name],
            row[&Attribute::Size]
        );
    }

    // The same walk, filtered down to Rust sources only
    let mut query = fsq::parser::run("SELECT name FROM demo_data WHERE name LIKE %.rs")?;
    let rows = query.execute()?;
    assert_eq!(rows.len(), 1);
    println!("Only Rust source: {}", rows[0][&Attribute::Name]);

    // One-shot convenience: parse, execute, and print in a single call
    println!("Formatted output of fsq::run:");
    fsq::run("SELECT name, size FROM demo_data WHERE mode IS reg")?;

    println!("Scratch tree left at {dir:?} for inspection");
    Ok(())
}
