//! Client-side routing table.
//!
//! # Route Structure
//!
//! ```text
//! /                       - Home
//! /auth                   - Login / register
//! /profile                - Account, saved addresses
//! /contact                - Contact form
//! /markalar               - Brands
//! /canta/bel-cantasi      - Waist bag listing      (query → page)
//! /listing                - Generic listing        (query → page)
//! /product/:id            - Product detail         (id → page)
//! /checkout               - Checkout
//! /payment                - Payment
//! /iade-kosullari         - Return policy
//! /sss                    - FAQ
//! /on-bilgilendirme       - Pre-purchase information
//! /satis-sozlesmesi       - Sales agreement
//! ```
//!
//! Matching ignores ASCII case and a trailing slash. Paths are resolved
//! against the app origin, so both `/sss` and `https://host/sss` work.

use url::Url;

const APP_ORIGIN: &str = "http://vitrin.local/";

/// A page of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Auth,
    Profile,
    Contact,
    Brands,
    /// The waist bag category page.
    BagListing,
    Listing,
    ProductDetail,
    Checkout,
    Payment,
    ReturnPolicy,
    Faq,
    PreInfo,
    SalesAgreement,
}

impl Page {
    /// Every page, in routing table order.
    pub const ALL: [Self; 14] = [
        Self::Home,
        Self::Auth,
        Self::Profile,
        Self::Contact,
        Self::Brands,
        Self::BagListing,
        Self::Listing,
        Self::ProductDetail,
        Self::Checkout,
        Self::Payment,
        Self::ReturnPolicy,
        Self::Faq,
        Self::PreInfo,
        Self::SalesAgreement,
    ];

    /// Route name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Auth => "Auth",
            Self::Profile => "Profile",
            Self::Contact => "Contact",
            Self::Brands => "Brands",
            Self::BagListing => "ListingPage",
            Self::Listing => "Listing",
            Self::ProductDetail => "ProductDetail",
            Self::Checkout => "Checkout",
            Self::Payment => "Payment",
            Self::ReturnPolicy => "ReturnPolicy",
            Self::Faq => "FAQ",
            Self::PreInfo => "PreInfo",
            Self::SalesAgreement => "SalesAgreement",
        }
    }

    /// Path pattern. `:id` marks a parameter segment.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Auth => "/auth",
            Self::Profile => "/profile",
            Self::Contact => "/contact",
            Self::Brands => "/markalar",
            Self::BagListing => "/canta/bel-cantasi",
            Self::Listing => "/listing",
            Self::ProductDetail => "/product/:id",
            Self::Checkout => "/checkout",
            Self::Payment => "/payment",
            Self::ReturnPolicy => "/iade-kosullari",
            Self::Faq => "/sss",
            Self::PreInfo => "/on-bilgilendirme",
            Self::SalesAgreement => "/satis-sozlesmesi",
        }
    }

    /// The view that renders the page. Both listing routes share one view.
    #[must_use]
    pub const fn view(self) -> &'static str {
        match self {
            Self::BagListing | Self::Listing => "ListingPage",
            other => other.name(),
        }
    }

    const fn takes_query(self) -> bool {
        matches!(self, Self::BagListing | Self::Listing)
    }

    fn pattern(self) -> impl Iterator<Item = &'static str> {
        self.path().split('/').filter(|s| !s.is_empty())
    }
}

/// Values a route passes to its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Props {
    None,
    /// Query string pairs, in order, for listing pages.
    Query(Vec<(String, String)>),
    /// Decoded `:id` segment of a product page.
    Product { id: String },
}

/// A matched route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub page: Page,
    pub props: Props,
}

impl Route {
    /// Route name of the matched page.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.page.name()
    }

    /// Link to this route.
    #[must_use]
    pub fn href(&self) -> String {
        match &self.props {
            Props::Product { id } => format!("/product/{}", urlencoding::encode(id)),
            Props::Query(pairs) if !pairs.is_empty() => {
                let query = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs)
                    .finish();
                format!("{}?{query}", self.page.path())
            }
            _ => self.page.path().to_string(),
        }
    }
}

/// Match a location against the routing table.
///
/// Returns `None` for paths no page claims.
#[must_use]
pub fn resolve(location: &str) -> Option<Route> {
    let base = Url::parse(APP_ORIGIN).ok()?;
    let url = base.join(location).ok()?;
    let segments: Vec<&str> = url.path().split('/').filter(|s| !s.is_empty()).collect();

    let (page, id) = Page::ALL
        .iter()
        .find_map(|page| match_page(*page, &segments).map(|id| (*page, id)))?;

    let props = match id {
        Some(id) => Props::Product { id },
        None if page.takes_query() => Props::Query(
            url.query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        ),
        None => Props::None,
    };

    tracing::trace!(location, route = page.name(), "Resolved route");
    Some(Route { page, props })
}

/// `Some(param)` when `segments` match the page; `param` is the decoded
/// `:id` segment, if the pattern has one.
#[allow(clippy::option_option)]
fn match_page(page: Page, segments: &[&str]) -> Option<Option<String>> {
    if page.pattern().count() != segments.len() {
        return None;
    }

    let mut param = None;
    for (expected, actual) in page.pattern().zip(segments) {
        if expected.starts_with(':') {
            param = Some(urlencoding::decode(actual).ok()?.into_owned());
        } else if !expected.eq_ignore_ascii_case(actual) {
            return None;
        }
    }
    Some(param)
}

/// Scroll offset of a page, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPosition {
    pub left: f64,
    pub top: f64,
}

/// Where to scroll after navigating.
///
/// Back/forward navigation restores the saved offset; anything else starts at
/// the top of the page.
#[must_use]
pub fn scroll_behavior(saved: Option<ScrollPosition>) -> ScrollPosition {
    saved.unwrap_or_default()
}
