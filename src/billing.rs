//! Payment plans offered at checkout.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    /// One-off payment.
    Payment,
    Subscription,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPlan {
    /// Checkout price identifier; `free_plan` never reaches the payment provider.
    pub price_id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mode: PlanMode,
    pub price: u32,
    pub currency: &'static str,
}

impl PaymentPlan {
    pub fn is_free(&self) -> bool {
        self.price == 0
    }
}

pub const FREE_PLAN_ID: &str = "free_plan";

static PLANS: [PaymentPlan; 3] = [
    PaymentPlan {
        price_id: FREE_PLAN_ID,
        name: "Free Plan",
        description: "Perfect for getting started with basic features and limited AI generation",
        mode: PlanMode::Payment,
        price: 0,
        currency: "ZAR",
    },
    PaymentPlan {
        price_id: "price_1RiVkACVwlXJEJ4LUrEYcLDe",
        name: "Individual Subscription",
        description: "Unlimited AI profile generation and premium features for individual service providers",
        mode: PlanMode::Subscription,
        price: 50,
        currency: "ZAR",
    },
    PaymentPlan {
        price_id: "price_1RiVhtCVwlXJEJ4LKPOZPcqh",
        name: "Business Subscription",
        description: "Complete business solution with booking management, analytics, and priority support",
        mode: PlanMode::Subscription,
        price: 100,
        currency: "ZAR",
    },
];

pub fn plans() -> &'static [PaymentPlan] {
    &PLANS
}

pub fn find_plan(price_id: &str) -> Option<&'static PaymentPlan> {
    PLANS.iter().find(|plan| plan.price_id == price_id)
}
