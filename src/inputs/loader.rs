//! Load work periods from work_periods.csv

use super::WorkPeriod;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching work_periods.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "StartAge")]
    start_age: u32,
    #[serde(rename = "EndAge")]
    end_age: u32,
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "MonthlyTrainingContribution")]
    monthly_training_contribution: f64,
    #[serde(rename = "PensionAnnualReturn")]
    pension_annual_return: f64,
    #[serde(rename = "DepositFeePct")]
    deposit_fee_pct: f64,
    #[serde(rename = "AnnualFeePct")]
    annual_fee_pct: f64,
}

impl CsvRow {
    fn to_period(self) -> Result<WorkPeriod, Box<dyn Error>> {
        if self.end_age < self.start_age {
            return Err(format!(
                "Work period ends before it starts: {} -> {}",
                self.start_age, self.end_age
            )
            .into());
        }

        Ok(WorkPeriod {
            country: self.country.to_lowercase(),
            start_age: self.start_age,
            end_age: self.end_age,
            monthly_contribution: self.monthly_contribution,
            monthly_training_contribution: self.monthly_training_contribution,
            pension_annual_return: self.pension_annual_return,
            deposit_fee_pct: self.deposit_fee_pct,
            annual_fee_pct: self.annual_fee_pct,
        })
    }
}

/// Load all work periods from a CSV file
pub fn load_work_periods<P: AsRef<Path>>(path: P) -> Result<Vec<WorkPeriod>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut periods = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        periods.push(row.to_period()?);
    }

    Ok(periods)
}

/// Load work periods from any reader (e.g., string buffer, network stream)
pub fn load_work_periods_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<WorkPeriod>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut periods = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        periods.push(row.to_period()?);
    }

    Ok(periods)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Country,StartAge,EndAge,MonthlyContribution,MonthlyTrainingContribution,PensionAnnualReturn,DepositFeePct,AnnualFeePct
Israel,25,40,3000,750,7.0,0.1,0.5
usa,40,67,4500,0,7.5,0.0,0.8
";

    #[test]
    fn test_load_from_reader() {
        let periods = load_work_periods_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(periods.len(), 2);

        assert_eq!(periods[0].country, "israel");
        assert_eq!(periods[0].start_age, 25);
        assert_eq!(periods[0].end_age, 40);
        assert!((periods[0].monthly_training_contribution - 750.0).abs() < 1e-10);

        assert_eq!(periods[1].country, "usa");
        assert!((periods[1].annual_fee_pct - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_inverted_period_rejected() {
        let bad = "\
Country,StartAge,EndAge,MonthlyContribution,MonthlyTrainingContribution,PensionAnnualReturn,DepositFeePct,AnnualFeePct
Israel,40,25,3000,750,7.0,0.1,0.5
";
        assert!(load_work_periods_from_reader(bad.as_bytes()).is_err());
    }
}
