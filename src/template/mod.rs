// SPDX-FileCopyrightText: 2026 Flowsketch Authors
// SPDX-License-Identifier: MIT

//! Template advisor.
//!
//! Scans free-form process text for keyword hits and proposes one of four
//! canned scripted procedures. Detection is a pure function of the text and
//! runs synchronously on every change, so the current suggestion always
//! reflects the current source text.

use serde::{Deserialize, Serialize};

/// The four canned process patterns the advisor can suggest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateKey {
    Login,
    Payment,
    Signup,
    Order,
}

const LOGIN_TEMPLATE: &str = "User opens login page
User enters credentials
If credentials valid
Go to dashboard
Else show error";

const PAYMENT_TEMPLATE: &str = "User selects product
User proceeds to payment
If payment successful
Order confirmed
Else retry payment";

const SIGNUP_TEMPLATE: &str = "User opens signup page
User enters details
If details valid
Account created
Else show error";

const ORDER_TEMPLATE: &str = "Customer adds item to cart
Customer proceeds to checkout
If payment successful
Order placed
Else payment failed";

impl TemplateKey {
    /// Upper-cased display label for the suggestion banner.
    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "LOGIN",
            Self::Payment => "PAYMENT",
            Self::Signup => "SIGNUP",
            Self::Order => "ORDER",
        }
    }

    /// The canned scripted text this key stands for.
    pub fn template(self) -> &'static str {
        match self {
            Self::Login => LOGIN_TEMPLATE,
            Self::Payment => PAYMENT_TEMPLATE,
            Self::Signup => SIGNUP_TEMPLATE,
            Self::Order => ORDER_TEMPLATE,
        }
    }
}

/// Keyword containment on the lower-cased input, checked in fixed priority
/// order; the first hit wins.
pub fn detect(text: &str) -> Option<TemplateKey> {
    let t = text.to_lowercase();
    if t.contains("login") {
        return Some(TemplateKey::Login);
    }
    if t.contains("payment") {
        return Some(TemplateKey::Payment);
    }
    if t.contains("signup") || t.contains("register") {
        return Some(TemplateKey::Signup);
    }
    if t.contains("order") || t.contains("cart") {
        return Some(TemplateKey::Order);
    }
    None
}
