//! Writes a small references sheet for trying the viewer offline
//! (File → Open CSV…).
//!
//! Usage: `generate_sample [OUTPUT]` (default `sample_refs.csv`).

use anyhow::{Context, Result};

const REGIONS: &[(&str, &[&str])] = &[
    ("Africa", &["Kenya", "Nigeria"]),
    ("Asia", &["Japan", "India", "Vietnam"]),
    ("Europe", &["Portugal", "Germany"]),
    ("Latin America", &["Brazil", "Chile"]),
    ("Eastern Mediterranean", &["Egypt"]),
];

const AUTHORS: &[&str] = &[
    "Silva A", "Tanaka K", "Okafor C", "Müller H", "Nguyen T", "Rossi M", "Patel R",
];

const HEADER: &[&str] = &["Num", "Region", "country", "Autores", "Titulo", "Resumo", "Ref"];

/// Minimal deterministic PRNG (64-bit LCG)
struct SimpleRng(u64);

impl SimpleRng {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_refs.csv".to_string());
    let mut rng = SimpleRng(42);
    let mut wtr = csv::Writer::from_path(&output).with_context(|| format!("creating {output}"))?;
    wtr.write_record(HEADER)?;

    let mut num = 0;
    for (region, countries) in REGIONS {
        for _ in 0..3 {
            num += 1;
            let country = countries[rng.next(countries.len())];

            let n_authors = 1 + rng.next(3);
            let mut authors: Vec<&str> = Vec::new();
            while authors.len() < n_authors {
                let a = AUTHORS[rng.next(AUTHORS.len())];
                if !authors.contains(&a) {
                    authors.push(a);
                }
            }

            let n_refs = 1 + rng.next(3);
            let refs: Vec<String> = (1..=n_refs)
                .map(|k| format!("{} et al. ({}) Reference {num}.{k}", authors[0], 2000 + rng.next(24)))
                .collect();

            wtr.write_record([
                num.to_string(),
                region.to_string(),
                country.to_string(),
                authors.join(", "),
                format!("Study {num} on {country}"),
                format!("Abstract of study {num}."),
                refs.join("\n\n"),
            ])?;
        }
    }
    wtr.flush()?;

    println!("Wrote {num} references to {output}");
    Ok(())
}
