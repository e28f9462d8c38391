//! Country tax rules: progressive bracket evaluation, net-salary breakdowns,
//! and the blended pension tax rate

mod brackets;
mod pension;
mod profiles;

pub use brackets::{income_tax, BracketWalk, TaxBracket, TaxBracketDetail};
pub use pension::blended_pension_rate;
pub use profiles::{
    CountryTaxProfile, DeductionDetail, DeductionRule, NetSalary, NetSalaryBreakdown,
    SocialInsuranceDetail, SocialInsuranceItem, TaxProfiles,
};
