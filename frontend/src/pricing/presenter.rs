use log::warn;

use crate::error::PresentError;
use crate::pricing::models::{PricingConfig, RegionCode, RegionPricing};


/// Page elements the presenter writes into, by element id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    MonthlyPrice,
    AnnualPrice,
    MonthlyCta,
    AnnualCta,
    SaveBadge,
    SaveMonths,
    CtaNote,
    PricingNote,
}

impl Slot {
    pub fn id(self) -> &'static str {
        match self {
            Slot::MonthlyPrice => "monthly-price",
            Slot::AnnualPrice => "annual-price",
            Slot::MonthlyCta => "monthly-cta",
            Slot::AnnualCta => "annual-cta",
            Slot::SaveBadge => "save-badge",
            Slot::SaveMonths => "save-months",
            Slot::CtaNote => "cta-note",
            Slot::PricingNote => "pricing-note",
        }
    }
}

/// Anything the pricing texts can be written into. Writing to a slot the
/// page doesn't have must be a silent no-op.
pub trait DisplaySlots {
    fn set_text(&self, slot: Slot, text: &str);
    fn set_link(&self, slot: Slot, href: &str);
}

/// Whole amounts print bare ("2"), anything else with two decimals.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{:.2}", amount)
    }
}

fn monthly_total(monthly: f64) -> Option<f64> {
    (monthly.is_finite() && monthly > 0.0).then_some(monthly * 12.0)
}

/// round((1 - annual / (monthly * 12)) * 100), kept within 0..=100.
pub fn savings_percent(monthly: f64, annual: f64) -> u32 {
    match monthly_total(monthly) {
        Some(year) => {
            let percent = ((1.0 - annual / year) * 100.0).round();
            if percent.is_finite() && percent > 0.0 { percent.min(100.0) as u32 } else { 0 }
        }
        None => 0,
    }
}

/// round((monthly * 12 - annual) / monthly), kept within 0..=12.
pub fn months_free(monthly: f64, annual: f64) -> u32 {
    match monthly_total(monthly) {
        Some(year) => {
            let months = ((year - annual) / monthly).round();
            if months.is_finite() && months > 0.0 { months.min(12.0) as u32 } else { 0 }
        }
        None => 0,
    }
}

pub fn months_free_text(months: u32) -> String {
    if months == 1 {
        "1 month free".to_string()
    } else {
        format!("{} months free", months)
    }
}

/// The wording depends on the region, the currency on the entry actually shown.
pub fn disclaimer(region: &RegionCode, currency: &str) -> String {
    if region.is_india() {
        format!("Prices shown in {} and include applicable Indian taxes.", currency)
    } else {
        format!("Prices shown in {}. Local taxes may apply at checkout.", currency)
    }
}

/// Every text the pricing section shows for one region.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSummary {
    pub monthly_price: String,
    pub annual_price: String,
    pub save_badge: String,
    pub save_months: String,
    pub cta_note: String,
    pub pricing_note: String,
    pub monthly_checkout: Option<String>,
    pub annual_checkout: Option<String>,
}

impl PriceSummary {
    pub fn new(pricing: &RegionPricing, region: &RegionCode) -> Self {
        let monthly = format!("{}{}", pricing.symbol, format_amount(pricing.monthly));
        Self {
            annual_price: format!("{}{}", pricing.symbol, format_amount(pricing.annual)),
            save_badge: format!("Save {}%", savings_percent(pricing.monthly, pricing.annual)),
            save_months: months_free_text(months_free(pricing.monthly, pricing.annual)),
            cta_note: format!("Start at {}/month. Cancel anytime.", monthly),
            monthly_price: monthly,
            pricing_note: disclaimer(region, &pricing.currency),
            monthly_checkout: pricing.checkout_urls.monthly.clone(),
            annual_checkout: pricing.checkout_urls.annual.clone(),
        }
    }

    pub fn render(&self, slots: &impl DisplaySlots) {
        slots.set_text(Slot::MonthlyPrice, &self.monthly_price);
        slots.set_text(Slot::AnnualPrice, &self.annual_price);
        slots.set_text(Slot::SaveBadge, &self.save_badge);
        slots.set_text(Slot::SaveMonths, &self.save_months);
        slots.set_text(Slot::CtaNote, &self.cta_note);
        slots.set_text(Slot::PricingNote, &self.pricing_note);
        if let Some(href) = &self.monthly_checkout {
            slots.set_link(Slot::MonthlyCta, href);
        }
        if let Some(href) = &self.annual_checkout {
            slots.set_link(Slot::AnnualCta, href);
        }
    }
}

/// Writes the prices for `region` into the page. When the config has neither
/// an entry for the region nor a default one, nothing is touched and the
/// page keeps whatever placeholder text it shipped with.
pub fn present(
    config: &PricingConfig,
    region: &RegionCode,
    slots: &impl DisplaySlots,
) -> Result<PriceSummary, PresentError> {
    let Some(pricing) = config.for_region(region) else {
        warn!("No pricing for region {} and no default entry, leaving page as is", region);
        return Err(PresentError::NoPricingForRegion(region.to_string()));
    };
    let summary = PriceSummary::new(pricing, region);
    summary.render(slots);
    Ok(summary)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{BTreeMap, BTreeSet};

    /// In-memory page. Slots listed in `missing` behave like absent elements.
    #[derive(Default)]
    pub(crate) struct MemorySlots {
        pub text: RefCell<BTreeMap<Slot, String>>,
        pub links: RefCell<BTreeMap<Slot, String>>,
        pub missing: BTreeSet<Slot>,
    }

    impl DisplaySlots for MemorySlots {
        fn set_text(&self, slot: Slot, text: &str) {
            if !self.missing.contains(&slot) {
                self.text.borrow_mut().insert(slot, text.to_string());
            }
        }

        fn set_link(&self, slot: Slot, href: &str) {
            if !self.missing.contains(&slot) {
                self.links.borrow_mut().insert(slot, href.to_string());
            }
        }
    }

    impl MemorySlots {
        pub(crate) fn text(&self, slot: Slot) -> Option<String> {
            self.text.borrow().get(&slot).cloned()
        }
    }

    fn region(code: &str) -> RegionCode {
        RegionCode::from_country_code(code).unwrap()
    }

    #[test]
    fn default_pricing_numbers() {
        assert_eq!(savings_percent(2.0, 15.0), 38);
        assert_eq!(months_free(2.0, 15.0), 5);
        assert_eq!(months_free_text(months_free(2.0, 15.0)), "5 months free");
    }

    #[test]
    fn india_pricing_numbers() {
        assert_eq!(savings_percent(99.0, 799.0), 33);
        assert_eq!(months_free(99.0, 799.0), 4);
        assert_eq!(months_free_text(4), "4 months free");
    }

    #[test]
    fn pathological_prices_clamp_to_zero() {
        assert_eq!(savings_percent(2.0, 30.0), 0);
        assert_eq!(months_free(2.0, 30.0), 0);
        assert_eq!(savings_percent(0.0, 15.0), 0);
        assert_eq!(months_free(0.0, 15.0), 0);
        assert_eq!(savings_percent(f64::NAN, 15.0), 0);
        assert_eq!(months_free_text(0), "0 months free");
        assert_eq!(months_free_text(1), "1 month free");
    }

    #[test]
    fn negative_annual_is_clamped() {
        assert_eq!(savings_percent(2.0, -5.0), 100);
        assert_eq!(months_free(2.0, -5.0), 12);
    }

    #[test]
    fn india_without_india_entry_names_shown_currency() {
        let mut config = PricingConfig::fallback();
        config.regions.remove(&RegionCode::india());
        let slots = MemorySlots::default();

        present(&config, &RegionCode::india(), &slots).unwrap();

        assert_eq!(slots.text(Slot::MonthlyPrice).as_deref(), Some("$2"));
        let note = slots.text(Slot::PricingNote).unwrap();
        assert!(note.contains("USD"), "{}", note);
        assert!(!note.contains("INR"), "{}", note);
    }

    #[test]
    fn amounts() {
        assert_eq!(format_amount(2.0), "2");
        assert_eq!(format_amount(799.0), "799");
        assert_eq!(format_amount(4.5), "4.50");
    }

    #[test]
    fn renders_every_slot_for_india() {
        let slots = MemorySlots::default();
        present(&PricingConfig::fallback(), &RegionCode::india(), &slots).unwrap();

        assert_eq!(slots.text(Slot::MonthlyPrice).as_deref(), Some("₹99"));
        assert_eq!(slots.text(Slot::AnnualPrice).as_deref(), Some("₹799"));
        assert_eq!(slots.text(Slot::SaveBadge).as_deref(), Some("Save 33%"));
        assert_eq!(slots.text(Slot::SaveMonths).as_deref(), Some("4 months free"));
        assert_eq!(slots.text(Slot::CtaNote).as_deref(), Some("Start at ₹99/month. Cancel anytime."));
        assert_eq!(
            slots.text(Slot::PricingNote).as_deref(),
            Some("Prices shown in INR and include applicable Indian taxes.")
        );
        assert_eq!(slots.links.borrow().len(), 2);
    }

    #[test]
    fn unknown_region_renders_default_entry_with_generic_note() {
        let slots = MemorySlots::default();
        present(&PricingConfig::fallback(), &region("BR"), &slots).unwrap();

        assert_eq!(slots.text(Slot::MonthlyPrice).as_deref(), Some("$2"));
        assert_eq!(slots.text(Slot::AnnualPrice).as_deref(), Some("$15"));
        assert_eq!(slots.text(Slot::SaveBadge).as_deref(), Some("Save 38%"));
        assert_eq!(slots.text(Slot::SaveMonths).as_deref(), Some("5 months free"));
        assert_eq!(
            slots.text(Slot::PricingNote).as_deref(),
            Some("Prices shown in USD. Local taxes may apply at checkout.")
        );
    }

    #[test]
    fn checkout_links_only_written_when_present() {
        let mut config = PricingConfig::fallback();
        for pricing in config.regions.values_mut() {
            pricing.checkout_urls.annual = None;
        }
        let slots = MemorySlots::default();
        present(&config, &RegionCode::default_region(), &slots).unwrap();

        let links = slots.links.borrow();
        assert_eq!(links.get(&Slot::MonthlyCta).map(String::as_str), Some("#checkout-monthly"));
        assert!(!links.contains_key(&Slot::AnnualCta));
    }

    #[test]
    fn missing_slots_are_skipped() {
        let slots = MemorySlots {
            missing: [Slot::SaveBadge, Slot::MonthlyCta].into_iter().collect(),
            ..Default::default()
        };
        present(&PricingConfig::fallback(), &RegionCode::default_region(), &slots).unwrap();

        assert!(slots.text(Slot::SaveBadge).is_none());
        assert!(!slots.links.borrow().contains_key(&Slot::MonthlyCta));
        assert_eq!(slots.text(Slot::MonthlyPrice).as_deref(), Some("$2"));
    }

    #[test]
    fn no_default_entry_leaves_page_untouched() {
        let mut config = PricingConfig::fallback();
        config.regions.remove(&RegionCode::default_region());
        let slots = MemorySlots::default();

        let outcome = present(&config, &region("FR"), &slots);

        assert_eq!(outcome, Err(PresentError::NoPricingForRegion("FR".to_string())));
        assert!(slots.text.borrow().is_empty());
        assert!(slots.links.borrow().is_empty());
    }

    #[test]
    fn presenting_twice_gives_same_page() {
        let config = PricingConfig::fallback();
        let slots = MemorySlots::default();
        present(&config, &RegionCode::india(), &slots).unwrap();
        let first = (slots.text.borrow().clone(), slots.links.borrow().clone());
        present(&config, &RegionCode::india(), &slots).unwrap();
        assert_eq!(first, (slots.text.borrow().clone(), slots.links.borrow().clone()));
    }
}
