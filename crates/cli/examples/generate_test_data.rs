use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};

fn record(id: &str, title: &str, abstract_text: &str, categories: &str, date: &str) -> serde_json::Value {
    json!({
        "id": id,
        "submitter": "Test Submitter",
        "authors": "A. Author, B. Author",
        "title": title,
        "comments": "10 pages, 3 figures",
        "journal-ref": null,
        "doi": null,
        "abstract": abstract_text,
        "categories": categories,
        "versions": [{"version": "v1", "created": "Mon, 2 Apr 2007 19:18:42 GMT"}],
        "update_date": date,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/arxiv_sample.json".to_string());

    let mut writer = BufWriter::new(File::create(&output_file)?);

    println!("Generating arXiv metadata sample: {}\n", output_file);

    println!("Adding exact duplicates...");
    for i in 0..3 {
        writeln!(
            writer,
            "{}",
            record(
                &format!("0704.000{}", i + 1),
                "Calculation of prompt diphoton production cross sections",
                "  A fully differential calculation in perturbative quantum chromodynamics is\npresented for the production of massive photon pairs at hadron colliders.\n",
                "hep-ph",
                "2008-11-13",
            )
        )?;
    }

    println!("Adding records that clean to empty text...");
    writeln!(writer, "{}", record("0704.0004", "On the", "", "math.CO", "2007-05-23"))?;
    writeln!(writer, "{}", record("0704.0005", "", "We show that 2023 is 42.", "math.NT", "2007-05-23"))?;

    println!("Adding records with URLs, markup and numbers...");
    writeln!(
        writer,
        "{}",
        record(
            "0704.0006",
            "Bosonic characters of atomic Cooper pairs",
            "Code is available at https://example.org/code. We study <i>two</i> species in 3 dimensions.",
            "cond-mat.mes-hall",
            "2015-05-13",
        )
    )?;

    println!("Adding records with missing fields...");
    writeln!(writer, "{}", json!({"id": "0704.0007", "title": "Polymer Quantum Mechanics", "categories": "gr-qc"}))?;
    writeln!(writer, "{}", json!({"id": "0704.0008", "abstract": "Numerical solutions for the Einstein equations.", "update_date": "2009-08-13"}))?;

    println!("Adding unique records...");
    let topics = [
        ("Sparsity-certifying graph decompositions", "math.CO cs.CG"),
        ("The evolution of the Earth-Moon system", "physics.gen-ph"),
        ("Dark matter halos in galaxy clusters", "astro-ph.CO"),
        ("Spin glasses and replica symmetry breaking", "cond-mat.dis-nn"),
        ("Topological insulators with surface states", "cond-mat.str-el"),
    ];
    for (i, (title, categories)) in topics.iter().enumerate() {
        writeln!(
            writer,
            "{}",
            record(
                &format!("0704.{:04}", 100 + i),
                title,
                &format!("We describe {} in detail and compare with observations.", title.to_lowercase()),
                categories,
                &format!("2010-01-{:02}", i + 1),
            )
        )?;
    }

    writer.flush()?;

    println!("\nGenerated arXiv metadata sample with 13 records");
    println!("  - Exact duplicates: 2");
    println!("  - Empty after cleaning: 2");
    println!("  - Missing fields: 2");
    println!("\nRun preprocessing with:");
    println!("  cargo run -p arxprep -- preprocess -i {} -o /tmp/arxiv_sample.csv --chunk-size 4", output_file);

    Ok(())
}
