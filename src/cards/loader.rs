//! Load cards from a CSV statement export

use super::NewCard;
use crate::error::Result;
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching the card export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Balance")]
    balance: f64,
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
    #[serde(rename = "MinPayment")]
    min_payment: f64,
    #[serde(rename = "PaymentDate")]
    payment_date: u8,
    #[serde(rename = "Currency", default)]
    currency: Option<String>,
}

impl CsvRow {
    fn to_new_card(self) -> Result<NewCard> {
        let currency = self
            .currency
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty());

        let card = NewCard {
            name: self.name.trim().to_string(),
            balance: self.balance,
            interest_rate: self.interest_rate,
            min_payment: self.min_payment,
            payment_date: self.payment_date,
            grace_period: None,
            currency,
        };
        card.validate()?;
        Ok(card)
    }
}

/// Load all cards from a CSV file
pub fn load_cards<P: AsRef<Path>>(path: P) -> Result<Vec<NewCard>> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load cards from any reader (e.g., string buffer, stdin)
pub fn load_cards_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<NewCard>> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<NewCard>> {
    let mut cards = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        cards.push(row.to_new_card()?);
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;

    #[test]
    fn test_load_cards_from_reader() {
        let data = "\
Name,Balance,InterestRate,MinPayment,PaymentDate,Currency
Visa Gold,1200.50,24.9,100,15,usd
Store Card,300,29.9,25,1,
";
        let cards = load_cards_from_reader(data.as_bytes()).expect("Failed to load cards");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Visa Gold");
        assert_eq!(cards[0].currency.as_deref(), Some("USD"));
        assert_eq!(cards[1].payment_date, 1);
        assert!(cards[1].currency.is_none());
    }

    #[test]
    fn test_invalid_row_rejected() {
        let data = "\
Name,Balance,InterestRate,MinPayment,PaymentDate,Currency
Visa,100,20,10,40,RUB
";
        let err = load_cards_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));
    }

    #[test]
    fn test_malformed_number_is_csv_error() {
        let data = "\
Name,Balance,InterestRate,MinPayment,PaymentDate,Currency
Visa,lots,20,10,4,RUB
";
        let err = load_cards_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::Csv(_)));
    }
}
