//! Country tax profiles and net-salary computation
//!
//! Bracket tables and social-insurance parameters are bundled as static data
//! for the supported countries (2024 figures, annual amounts in local
//! currency).

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};

use super::brackets::{income_tax, TaxBracket, TaxBracketDetail};

/// A payroll social-insurance line item: rate applied to gross income up to
/// an optional annual cap
#[derive(Debug, Clone, Serialize)]
pub struct SocialInsuranceItem {
    pub label: &'static str,
    pub rate: f64,
    pub annual_cap: Option<f64>,
}

/// How a deduction rule modifies the tax computation
#[derive(Debug, Clone, Copy, Serialize)]
pub enum DeductionRule {
    /// Reduces taxable income before the bracket walk
    StandardDeduction(f64),

    /// Reduces the computed tax after the bracket walk, floored at zero
    TaxCredit(f64),
}

/// A social-insurance contribution computed for a specific income
#[derive(Debug, Clone, Serialize)]
pub struct SocialInsuranceDetail {
    pub label: &'static str,
    pub rate: f64,
    pub amount: f64,
}

/// A deduction applied for a specific income
#[derive(Debug, Clone, Serialize)]
pub struct DeductionDetail {
    pub label: &'static str,
    pub amount: f64,
}

/// Line-item breakdown of a net-salary computation
#[derive(Debug, Clone, Serialize)]
pub struct NetSalaryBreakdown {
    pub tax_bracket_details: Vec<TaxBracketDetail>,
    pub social_insurance_details: Vec<SocialInsuranceDetail>,
    pub deductions: Vec<DeductionDetail>,
}

/// Result of a gross-to-net salary computation
#[derive(Debug, Clone, Serialize)]
pub struct NetSalary {
    pub gross_salary: f64,
    pub total_tax: f64,
    pub effective_tax_rate: f64,
    pub net_salary: f64,
    pub marginal_tax_rate: f64,
    pub breakdown: NetSalaryBreakdown,
}

/// Tax rules for one country
#[derive(Debug, Clone, Serialize)]
pub struct CountryTaxProfile {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,

    /// Flat rate applied to pension income drawn in this country
    pub pension_tax_rate: f64,

    /// Monthly state old-age stipend
    pub social_security_monthly: f64,

    /// Progressive brackets in ascending order
    pub brackets: Vec<TaxBracket>,

    pub social_insurance: Vec<SocialInsuranceItem>,
    pub deductions: Vec<(&'static str, DeductionRule)>,
}

impl CountryTaxProfile {
    pub fn israel() -> Self {
        Self {
            code: "israel",
            name: "Israel",
            flag: "\u{1F1EE}\u{1F1F1}",
            pension_tax_rate: 0.15,
            social_security_monthly: 1_795.0,
            brackets: vec![
                TaxBracket::new(0.0, 84_120.0, 0.10),
                TaxBracket::new(84_120.0, 120_720.0, 0.14),
                TaxBracket::new(120_720.0, 193_800.0, 0.20),
                TaxBracket::new(193_800.0, 269_280.0, 0.31),
                TaxBracket::new(269_280.0, 560_280.0, 0.35),
                TaxBracket::new(560_280.0, 721_560.0, 0.47),
                TaxBracket::new(721_560.0, f64::INFINITY, 0.50),
            ],
            social_insurance: vec![
                SocialInsuranceItem {
                    label: "National Insurance",
                    rate: 0.07,
                    annual_cap: Some(533_520.0),
                },
                SocialInsuranceItem {
                    label: "Health Insurance",
                    rate: 0.05,
                    annual_cap: Some(533_520.0),
                },
            ],
            // 2.25 credit points at 2,904 each
            deductions: vec![("Credit points", DeductionRule::TaxCredit(6_534.0))],
        }
    }

    pub fn united_states() -> Self {
        Self {
            code: "usa",
            name: "United States",
            flag: "\u{1F1FA}\u{1F1F8}",
            pension_tax_rate: 0.25,
            social_security_monthly: 1_907.0,
            brackets: vec![
                TaxBracket::new(0.0, 11_600.0, 0.10),
                TaxBracket::new(11_600.0, 47_150.0, 0.12),
                TaxBracket::new(47_150.0, 100_525.0, 0.22),
                TaxBracket::new(100_525.0, 191_950.0, 0.24),
                TaxBracket::new(191_950.0, 243_725.0, 0.32),
                TaxBracket::new(243_725.0, 609_350.0, 0.35),
                TaxBracket::new(609_350.0, f64::INFINITY, 0.37),
            ],
            social_insurance: vec![
                SocialInsuranceItem {
                    label: "Social Security",
                    rate: 0.062,
                    annual_cap: Some(168_600.0),
                },
                SocialInsuranceItem {
                    label: "Medicare",
                    rate: 0.0145,
                    annual_cap: None,
                },
            ],
            deductions: vec![(
                "Standard deduction",
                DeductionRule::StandardDeduction(14_600.0),
            )],
        }
    }

    pub fn united_kingdom() -> Self {
        Self {
            code: "uk",
            name: "United Kingdom",
            flag: "\u{1F1EC}\u{1F1E7}",
            pension_tax_rate: 0.20,
            social_security_monthly: 958.0,
            brackets: vec![
                TaxBracket::new(0.0, 37_700.0, 0.20),
                TaxBracket::new(37_700.0, 112_570.0, 0.40),
                TaxBracket::new(112_570.0, f64::INFINITY, 0.45),
            ],
            social_insurance: vec![SocialInsuranceItem {
                label: "National Insurance",
                rate: 0.08,
                annual_cap: Some(50_270.0),
            }],
            deductions: vec![(
                "Personal allowance",
                DeductionRule::StandardDeduction(12_570.0),
            )],
        }
    }

    /// Compute a gross-to-net salary breakdown for this country.
    ///
    /// Monthly input is annualized for the bracket walk and the outputs are
    /// scaled back to monthly amounts.
    pub fn net_salary(&self, gross: f64, is_annual: bool) -> Result<NetSalary> {
        if gross < 0.0 {
            return Err(Error::Validation(format!(
                "gross salary must be non-negative, got {gross}"
            )));
        }

        let annual_gross = if is_annual { gross } else { gross * 12.0 };

        let mut taxable = annual_gross;
        let mut credits = 0.0;
        let mut deduction_details = Vec::with_capacity(self.deductions.len());

        for &(label, rule) in &self.deductions {
            match rule {
                DeductionRule::StandardDeduction(amount) => {
                    let applied = amount.min(taxable);
                    taxable -= applied;
                    deduction_details.push(DeductionDetail {
                        label,
                        amount: applied,
                    });
                }
                DeductionRule::TaxCredit(amount) => {
                    credits += amount;
                    deduction_details.push(DeductionDetail { label, amount });
                }
            }
        }

        let walk = income_tax(taxable, &self.brackets);
        let income_tax_due = (walk.total_tax - credits).max(0.0);

        let social_details: Vec<SocialInsuranceDetail> = self
            .social_insurance
            .iter()
            .map(|item| {
                let base = match item.annual_cap {
                    Some(cap) => annual_gross.min(cap),
                    None => annual_gross,
                };
                SocialInsuranceDetail {
                    label: item.label,
                    rate: item.rate,
                    amount: base * item.rate,
                }
            })
            .collect();
        let social_total: f64 = social_details.iter().map(|d| d.amount).sum();

        let total_tax = income_tax_due + social_total;
        let effective_tax_rate = if annual_gross > 0.0 {
            total_tax / annual_gross
        } else {
            0.0
        };

        let scale = if is_annual { 1.0 } else { 1.0 / 12.0 };

        Ok(NetSalary {
            gross_salary: annual_gross * scale,
            total_tax: total_tax * scale,
            effective_tax_rate,
            net_salary: (annual_gross - total_tax) * scale,
            marginal_tax_rate: walk.marginal_rate,
            breakdown: NetSalaryBreakdown {
                tax_bracket_details: walk.details,
                social_insurance_details: social_details
                    .into_iter()
                    .map(|d| SocialInsuranceDetail {
                        amount: d.amount * scale,
                        ..d
                    })
                    .collect(),
                deductions: deduction_details
                    .into_iter()
                    .map(|d| DeductionDetail {
                        amount: d.amount * scale,
                        ..d
                    })
                    .collect(),
            },
        })
    }
}

/// Registry of the bundled country profiles
#[derive(Debug, Clone)]
pub struct TaxProfiles {
    by_code: HashMap<&'static str, CountryTaxProfile>,
}

impl TaxProfiles {
    /// Build the registry of all bundled countries
    pub fn bundled() -> Self {
        let mut by_code = HashMap::new();
        for profile in [
            CountryTaxProfile::israel(),
            CountryTaxProfile::united_states(),
            CountryTaxProfile::united_kingdom(),
        ] {
            by_code.insert(profile.code, profile);
        }
        Self { by_code }
    }

    /// Look up a country profile by code
    pub fn get(&self, code: &str) -> Option<&CountryTaxProfile> {
        self.by_code.get(code)
    }

    /// Country codes available in the registry
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_code.keys().copied()
    }

    /// Gross-to-net salary for a country code; unsupported codes are a
    /// caller input error
    pub fn net_salary(&self, code: &str, gross: f64, is_annual: bool) -> Result<NetSalary> {
        let profile = self
            .get(code)
            .ok_or_else(|| Error::Validation(format!("unsupported country code: {code}")))?;
        profile.net_salary(gross, is_annual)
    }
}

impl Default for TaxProfiles {
    fn default() -> Self {
        Self::bundled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_israel_first_bracket_only() {
        let profile = CountryTaxProfile::israel();
        let result = profile.net_salary(60_000.0, true).unwrap();

        // 10% bracket tax fully absorbed by credit points
        assert!((result.breakdown.tax_bracket_details[0].tax - 6_000.0).abs() < 1e-10);
        let social: f64 = 60_000.0 * 0.07 + 60_000.0 * 0.05;
        assert!((result.total_tax - social).abs() < 1.0);
        assert!((result.marginal_tax_rate - 0.10).abs() < 1e-10);
    }

    #[test]
    fn test_us_standard_deduction_reduces_taxable() {
        let profile = CountryTaxProfile::united_states();
        let result = profile.net_salary(14_600.0, true).unwrap();

        // Entire income absorbed by the standard deduction
        assert!(result.breakdown.tax_bracket_details.is_empty());
        let social = 14_600.0 * 0.062 + 14_600.0 * 0.0145;
        assert!((result.total_tax - social).abs() < 1e-6);
    }

    #[test]
    fn test_monthly_input_scales_back() {
        let profile = CountryTaxProfile::israel();
        let annual = profile.net_salary(120_000.0, true).unwrap();
        let monthly = profile.net_salary(10_000.0, false).unwrap();

        assert!((annual.net_salary / 12.0 - monthly.net_salary).abs() < 1e-6);
        assert!((annual.effective_tax_rate - monthly.effective_tax_rate).abs() < 1e-10);
    }

    #[test]
    fn test_negative_gross_is_validation_error() {
        let profile = CountryTaxProfile::israel();
        assert!(matches!(
            profile.net_salary(-1.0, true),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_unsupported_country_is_validation_error() {
        let profiles = TaxProfiles::bundled();
        assert!(matches!(
            profiles.net_salary("atlantis", 100_000.0, true),
            Err(Error::Validation(_))
        ));
    }
}
