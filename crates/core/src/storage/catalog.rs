use super::{lock, Store};
use crate::domain::company::{CeoProfile, Company, Financials, NewCeoProfile, NewCompany};
use crate::domain::Id;
use chrono::Utc;

impl Store {
    pub fn companies(&self) -> Vec<Company> {
        lock(&self.companies).values().cloned().collect()
    }

    pub fn company(&self, id: Id) -> Option<Company> {
        lock(&self.companies).get(&id).cloned()
    }

    pub fn company_by_ticker(&self, ticker: &str) -> Option<Company> {
        lock(&self.companies)
            .values()
            .find(|c| c.ticker == ticker)
            .cloned()
    }

    pub fn create_company(&self, new: NewCompany) -> Company {
        let company = Company {
            id: self.ids.next_id(),
            name: new.name,
            ticker: new.ticker,
            sector: new.sector,
            currency: new.currency,
            financials: new.financials,
            created_at: Utc::now(),
        };
        lock(&self.companies).insert(company.id, company.clone());
        company
    }

    pub fn update_company_financials(
        &self,
        id: Id,
        financials: Option<Financials>,
    ) -> Option<Company> {
        let mut companies = lock(&self.companies);
        let company = companies.get_mut(&id)?;
        company.financials = financials;
        Some(company.clone())
    }

    pub fn ceo_profiles(&self) -> Vec<CeoProfile> {
        lock(&self.ceo_profiles).values().cloned().collect()
    }

    pub fn ceo_profile_by_company(&self, company_id: Id) -> Option<CeoProfile> {
        lock(&self.ceo_profiles)
            .values()
            .find(|p| p.company_id == company_id)
            .cloned()
    }

    pub fn create_ceo_profile(&self, new: NewCeoProfile) -> CeoProfile {
        let profile = CeoProfile {
            id: self.ids.next_id(),
            company_id: new.company_id,
            name: new.name,
            title: new.title,
            tenure: new.tenure,
            religion: new.religion,
            strategy: new.strategy,
            leadership: new.leadership,
            photo_url: new.photo_url,
            created_at: Utc::now(),
        };
        lock(&self.ceo_profiles).insert(profile.id, profile.clone());
        profile
    }
}
