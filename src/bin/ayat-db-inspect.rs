//! Developer utility to inspect a verse catalog database.

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    println!("DB: {}", options.db_path.display());
    if let Ok(meta) = std::fs::metadata(&options.db_path) {
        println!("Size: {} bytes", meta.len());
    }

    let uri = format!("file:{}?immutable=1", options.db_path.display());
    let conn = Connection::open_with_flags(
        uri,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
    )
    .map_err(|err| err.to_string())?;

    print_scalar(&conn, "verses", "SELECT COUNT(*) FROM all_aya")?;
    print_scalar(&conn, "surahs", "SELECT COUNT(DISTINCT sura) FROM all_aya")?;

    println!();
    print_verse(&conn, "First verse", "ORDER BY id ASC")?;
    print_verse(&conn, "Last verse", "ORDER BY id DESC")?;

    println!();
    println!("Settings:");
    let settings: Option<(Option<i64>, Option<f64>)> = conn
        .query_row(
            "SELECT current_aya, speed FROM current_aya LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(|err| format!("Query failed (settings). {err}"))?;
    match settings {
        Some((current, speed)) => println!(
            "- current_aya={} speed={}",
            current.map_or_else(|| "NULL".to_string(), |id| id.to_string()),
            speed.map_or_else(|| "NULL".to_string(), |speed| speed.to_string()),
        ),
        None => println!("- (no row)"),
    }

    Ok(())
}

#[derive(Debug, Clone)]
struct CliOptions {
    db_path: PathBuf,
}

fn parse_args(args: Vec<String>) -> Result<Option<CliOptions>, String> {
    let mut db_path: Option<PathBuf> = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--db" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--db requires a value".to_string())?;
                db_path = Some(PathBuf::from(value));
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    let Some(db_path) = db_path else {
        return Err("--db is required".to_string());
    };
    Ok(Some(CliOptions { db_path }))
}

fn help_text() -> String {
    ["ayat-db-inspect", "", "Usage:", "  ayat-db-inspect --db <path-to-aya.db>"].join("\n")
}

fn print_scalar(conn: &Connection, label: &str, sql: &str) -> Result<(), String> {
    let n: i64 = conn
        .query_row(sql, [], |row| row.get(0))
        .map_err(|err| format!("Query failed ({label}). {err}"))?;
    println!("{label}: {n}");
    Ok(())
}

fn print_verse(conn: &Connection, label: &str, order: &str) -> Result<(), String> {
    let sql = format!(
        "SELECT id, sura, sura_name, aya, aya_suffix, audio FROM all_aya {order} LIMIT 1"
    );
    let row: Option<(i64, i64, Option<String>, i64, Option<i64>, Option<String>)> = conn
        .query_row(&sql, [], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })
        .optional()
        .map_err(|err| format!("Query failed ({label}). {err}"))?;
    match row {
        Some((id, sura, name, aya, suffix, audio)) => {
            let suffix = suffix.map(|n| format!(" - {n}")).unwrap_or_default();
            println!(
                "{label}: id={id} surah={sura} ({}) ayah={aya}{suffix} audio={}",
                name.unwrap_or_default(),
                audio.unwrap_or_default()
            );
        }
        None => println!("{label}: (none)"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_flag_is_required() {
        assert!(parse_args(Vec::new()).is_err());
        assert!(parse_args(vec!["--db".into()]).is_err());
        assert!(parse_args(vec!["--bogus".into()]).is_err());
    }

    #[test]
    fn parses_db_path() {
        let options = parse_args(vec!["--db".into(), "aya.db".into()])
            .unwrap()
            .unwrap();
        assert_eq!(options.db_path, PathBuf::from("aya.db"));
    }
}
