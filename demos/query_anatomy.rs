use anyhow::Result;

fn main() -> Result<()> {
    // Every clause is optional; omitted clauses fall back to defaults
    let query = fsq::parser::run("WHERE size > 100")?;
    println!("{query}");

    // SELECT all and a bare attribute list render the same way
    let query = fsq::parser::run("SELECT * FROM .")?;
    println!("{query}");

    // Modifiers wrap their attribute innermost-first
    let query = fsq::parser::run("SELECT upper(name), format(size, mb) FROM /tmp")?;
    println!("{query}");

    // Exclusions carry a leading hyphen, aliases an AS suffix
    let query = fsq::parser::run("SELECT name FROM ./projects AS p, -./projects/target")?;
    println!("{query}");

    // Condition trees render fully parenthesized
    let query = fsq::parser::run(
        "SELECT name WHERE NOT name LIKE tmp% AND (size >= 1000 OR mode IS DIR)",
    )?;
    println!("{query}");

    // A rendered query parses back to an equivalent one
    let reparsed = fsq::parser::run(&query.to_string())?;
    assert_eq!(query, reparsed);
    println!("Round-trip parse succeeded");

    // Malformed input surfaces a typed parse error
    match fsq::parser::run("SELECT nonsense FROM .") {
        Ok(_) => println!("unexpectedly parsed"),
        Err(err) => println!("Rejected bad attribute: {err}"),
    }

    Ok(())
}
