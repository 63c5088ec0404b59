//! Billing Toggle - yearly/monthly pricing switch
//!
//! A single reactive flag. The plan table is the page's stock pricing.

use spark_signals::{signal, Signal};

/// Billing cadence shown on the pricing cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BillingPeriod {
    Monthly,
    #[default]
    Yearly,
}

impl BillingPeriod {
    pub fn flipped(self) -> Self {
        match self {
            Self::Monthly => Self::Yearly,
            Self::Yearly => Self::Monthly,
        }
    }
}

/// One pricing tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PricingPlan {
    pub name: &'static str,
    pub monthly: u32,
    pub yearly: u32,
}

impl PricingPlan {
    pub fn price(&self, period: BillingPeriod) -> u32 {
        match period {
            BillingPeriod::Monthly => self.monthly,
            BillingPeriod::Yearly => self.yearly,
        }
    }
}

pub const STARTER: PricingPlan = PricingPlan { name: "Starter", monthly: 29, yearly: 290 };
pub const PROFESSIONAL: PricingPlan = PricingPlan { name: "Professional", monthly: 99, yearly: 990 };
pub const ENTERPRISE: PricingPlan = PricingPlan { name: "Enterprise", monthly: 299, yearly: 2990 };

pub const PLANS: [PricingPlan; 3] = [STARTER, PROFESSIONAL, ENTERPRISE];

/// Reactive yearly/monthly switch. Starts on yearly.
#[derive(Clone)]
pub struct BillingToggle {
    period: Signal<BillingPeriod>,
}

impl Default for BillingToggle {
    fn default() -> Self {
        Self::new(BillingPeriod::default())
    }
}

impl BillingToggle {
    pub fn new(initial: BillingPeriod) -> Self {
        Self { period: signal(initial) }
    }

    pub fn period(&self) -> BillingPeriod {
        self.period.get()
    }

    pub fn period_signal(&self) -> Signal<BillingPeriod> {
        self.period.clone()
    }

    pub fn is_yearly(&self) -> bool {
        self.period() == BillingPeriod::Yearly
    }

    /// Flip the period and return the new one.
    pub fn toggle(&self) -> BillingPeriod {
        let next = self.period().flipped();
        self.period.set(next);
        next
    }

    pub fn price(&self, plan: &PricingPlan) -> u32 {
        plan.price(self.period())
    }
}
