//! Load a rate catalog from banks.csv and rates.csv

use super::data::{Bank, CatalogError, Rate, RateCatalog};
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching banks.csv columns
#[derive(Debug, serde::Deserialize)]
struct BankCsvRow {
    #[serde(rename = "BankID")]
    bank_id: u32,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Website")]
    website: String,
    #[serde(rename = "LogoURL")]
    logo_url: Option<String>,
}

impl BankCsvRow {
    fn into_bank(self) -> Bank {
        Bank {
            id: self.bank_id,
            name: self.name,
            website: self.website,
            logo_url: self.logo_url.filter(|url| !url.is_empty()),
        }
    }
}

/// Raw CSV row matching rates.csv columns
#[derive(Debug, serde::Deserialize)]
struct RateCsvRow {
    #[serde(rename = "RateID")]
    rate_id: u32,
    #[serde(rename = "BankID")]
    bank_id: u32,
    #[serde(rename = "TermMonths")]
    term_months: u32,
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
}

impl RateCsvRow {
    fn into_rate(self) -> Rate {
        Rate {
            id: self.rate_id,
            bank_id: self.bank_id,
            term_months: self.term_months,
            interest_rate: self.interest_rate,
        }
    }
}

/// Load a validated catalog from bank and rate CSV files
pub fn load_catalog<P: AsRef<Path>>(
    banks_path: P,
    rates_path: P,
) -> Result<RateCatalog, CatalogError> {
    let catalog = load_catalog_from_readers(
        Reader::from_path(banks_path)?,
        Reader::from_path(rates_path)?,
    )?;

    log::info!(
        "loaded catalog: {} banks, {} offers",
        catalog.banks().len(),
        catalog.offer_count()
    );

    Ok(catalog)
}

/// Load a catalog from any readers (e.g., string buffers, network streams)
pub fn load_catalog_from_readers<R: std::io::Read>(
    mut banks_reader: Reader<R>,
    mut rates_reader: Reader<R>,
) -> Result<RateCatalog, CatalogError> {
    let mut banks = Vec::new();
    for result in banks_reader.deserialize() {
        let row: BankCsvRow = result?;
        banks.push(row.into_bank());
    }

    let mut rates = Vec::new();
    for result in rates_reader.deserialize() {
        let row: RateCsvRow = result?;
        rates.push(row.into_rate());
    }

    RateCatalog::new(banks, rates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANKS_CSV: &str = "\
BankID,Name,Website,LogoURL
1,ANZ,https://anz.example.com,https://cdn.example.com/anz.png
2,Kiwibank,https://kiwibank.example.com,
";

    const RATES_CSV: &str = "\
RateID,BankID,TermMonths,InterestRate
1,1,12,0.04
2,1,24,0.045
3,2,12,0.041
";

    fn reader(data: &str) -> Reader<&[u8]> {
        Reader::from_reader(data.as_bytes())
    }

    #[test]
    fn test_load_catalog_from_readers() {
        let catalog = load_catalog_from_readers(reader(BANKS_CSV), reader(RATES_CSV)).unwrap();

        assert_eq!(catalog.banks().len(), 2);
        assert_eq!(catalog.offer_count(), 3);

        let anz = &catalog.banks()[0];
        assert_eq!(anz.id, 1);
        assert_eq!(anz.name, "ANZ");
        assert_eq!(anz.logo_url.as_deref(), Some("https://cdn.example.com/anz.png"));

        // Empty logo column maps to None
        assert_eq!(catalog.banks()[1].logo_url, None);

        let first_rate = &catalog.rates()[0];
        assert_eq!(first_rate.bank_id, 1);
        assert_eq!(first_rate.term_months, 12);
        assert_eq!(first_rate.interest_rate, 0.04);
    }

    #[test]
    fn test_load_rejects_bad_term() {
        let rates = "\
RateID,BankID,TermMonths,InterestRate
1,1,0,0.04
";
        let result = load_catalog_from_readers(reader(BANKS_CSV), reader(rates));
        assert!(matches!(result, Err(CatalogError::InvalidTerm { .. })));
    }

    #[test]
    fn test_load_rejects_unknown_bank() {
        let rates = "\
RateID,BankID,TermMonths,InterestRate
1,7,12,0.04
";
        let result = load_catalog_from_readers(reader(BANKS_CSV), reader(rates));
        assert!(matches!(result, Err(CatalogError::UnknownBank { .. })));
    }
}
