//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// Unique identifier for one ordering session (one customer visit)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog item identifier, unique within a catalog
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: &str) -> SharedResult<Self> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(SharedError::InvalidItemId { input: id.to_string() });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemId {
    type Error = SharedError;

    fn try_from(value: String) -> SharedResult<Self> {
        Self::new(&value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Size variant label, whitespace-insensitive ("1/4 m" == "1/4m")
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SizeLabel(String);

impl SizeLabel {
    /// Returns `None` when nothing but whitespace was given
    pub fn new(label: &str) -> Option<Self> {
        let normalized: String = label.split_whitespace().collect();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SizeLabel {
    type Error = SharedError;

    fn try_from(value: String) -> SharedResult<Self> {
        Self::new(&value).ok_or(SharedError::InvalidSizeList {
            segment: value.clone(),
            input: value,
        })
    }
}

impl From<SizeLabel> for String {
    fn from(label: SizeLabel) -> Self {
        label.0
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Identity of a cart line; each kind is its own namespace
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CartKey {
    Unit(ItemId),
    Sized(ItemId, SizeLabel),
    /// Varieties are kept sorted so the same mix merges into one line
    Combined {
        tier: SizeLabel,
        varieties: Vec<ItemId>,
        supplement: bool,
    },
}

impl CartKey {
    pub fn unit(item: &ItemId) -> Self {
        CartKey::Unit(item.clone())
    }

    pub fn sized(item: &ItemId, size: &SizeLabel) -> Self {
        CartKey::Sized(item.clone(), size.clone())
    }

    pub fn combined(tier: &SizeLabel, varieties: &[ItemId], supplement: bool) -> Self {
        let mut varieties = varieties.to_vec();
        varieties.sort_unstable();
        CartKey::Combined { tier: tier.clone(), varieties, supplement }
    }
}

/// Rendering only: `tuna`, `tuna:Petit`, `1/2m:margherita+tuna`,
/// `1/2m+sup:margherita+tuna`
impl fmt::Display for CartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            CartKey::Unit(item) => item.to_string(),
            CartKey::Sized(item, size) => format!("{item}:{size}"),
            CartKey::Combined { tier, varieties, supplement } => {
                let names: Vec<&str> = varieties.iter().map(ItemId::as_str).collect();
                let sup = if *supplement { "+sup" } else { "" };
                format!("{tier}{sup}:{}", names.join("+"))
            }
        };
        f.pad(&rendered)
    }
}

/// Exact amount in millimes (1 dt = 1000 millimes)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    const MILLIMES_PER_DINAR: u64 = 1000;

    pub const fn from_millimes(millimes: u64) -> Self {
        Self(millimes)
    }

    pub const fn from_dinars(dinars: u64) -> Self {
        Self(dinars * Self::MILLIMES_PER_DINAR)
    }

    pub fn millimes(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl FromStr for Price {
    type Err = SharedError;

    /// Accepts "12dt", "8.5dt", "+2.5dt", "12 dt" and bare "13.8"
    fn from_str(s: &str) -> SharedResult<Self> {
        let invalid = || SharedError::InvalidPrice { input: s.to_string() };

        let text = s.trim();
        let text = text.strip_prefix('+').unwrap_or(text);
        let text = text.strip_suffix("dt").unwrap_or(text).trim_end();

        let (whole, frac) = match text.split_once('.') {
            Some((whole, frac)) if !frac.is_empty() => (whole, frac),
            Some(_) => return Err(invalid()),
            None => (text, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) || frac.len() > 3 {
            return Err(invalid());
        }

        let dinars: u64 = whole.parse().map_err(|_| invalid())?;
        let millimes = frac
            .bytes()
            .zip([100u64, 10, 1])
            .map(|(digit, scale)| u64::from(digit - b'0') * scale)
            .sum::<u64>();

        dinars
            .checked_mul(Self::MILLIMES_PER_DINAR)
            .and_then(|m| m.checked_add(millimes))
            .map(Price)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for Price {
    type Error = SharedError;

    fn try_from(value: String) -> SharedResult<Self> {
        value.parse()
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dinars = self.0 / Self::MILLIMES_PER_DINAR;
        let millimes = self.0 % Self::MILLIMES_PER_DINAR;
        // pad so width/alignment flags apply to the whole amount
        if millimes % 10 == 0 {
            f.pad(&format!("{dinars}.{:02}dt", millimes / 10))
        } else {
            f.pad(&format!("{dinars}.{millimes:03}dt"))
        }
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Price) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Price;

    fn mul(self, quantity: u32) -> Price {
        Price(self.0 * u64::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

/// Size variants of one item, in listed order
pub type SizeVariants = Vec<(SizeLabel, Price)>;

/// Parse a size list such as
/// `"Petit 9dt - Moyen 12dt - Large 15dt - 1/4m 12dt - 1/2m 24dt - 1m 48dt"`.
///
/// Returns the variants in the order they were listed.
pub fn parse_size_list(input: &str) -> SharedResult<SizeVariants> {
    let mut variants = SizeVariants::new();

    for segment in input.split(" - ") {
        let malformed = || SharedError::InvalidSizeList {
            input: input.to_string(),
            segment: segment.to_string(),
        };

        let segment = segment.trim();
        let (label, price) = segment.rsplit_once(char::is_whitespace).ok_or_else(malformed)?;
        let label = SizeLabel::new(label).ok_or_else(malformed)?;
        let price: Price = price.parse().map_err(|_| malformed())?;

        if variants.iter().any(|(existing, _)| *existing == label) {
            return Err(malformed());
        }
        variants.push((label, price));
    }

    Ok(variants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_parsing() {
        assert_eq!("12dt".parse::<Price>().unwrap(), Price::from_dinars(12));
        assert_eq!("8.5dt".parse::<Price>().unwrap(), Price::from_millimes(8_500));
        assert_eq!("+2.5dt".parse::<Price>().unwrap(), Price::from_millimes(2_500));
        assert_eq!("13.8".parse::<Price>().unwrap(), Price::from_millimes(13_800));
        assert_eq!("12 dt".parse::<Price>().unwrap(), Price::from_dinars(12));
        assert_eq!("0.125dt".parse::<Price>().unwrap(), Price::from_millimes(125));
    }

    #[test]
    fn test_price_rejects_malformed_input() {
        for input in ["", "dt", "-3dt", "1.2345", "12.", ".5", "abc", "1,5dt"] {
            assert!(input.parse::<Price>().is_err(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_millimes(26_500).to_string(), "26.50dt");
        assert_eq!(Price::from_dinars(22).to_string(), "22.00dt");
        assert_eq!(Price::from_millimes(125).to_string(), "0.125dt");
        assert_eq!(Price::ZERO.to_string(), "0.00dt");
    }

    #[test]
    fn test_price_display_honors_width() {
        assert_eq!(format!("{:>9}", Price::from_dinars(9)), "   9.00dt");
        assert_eq!(format!("{:<6}|", ItemId::new("tuna").unwrap()), "tuna  |");
    }

    #[test]
    fn test_price_arithmetic() {
        let total: Price = [Price::from_dinars(12), Price::from_millimes(14_500)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_millimes(26_500));
        assert_eq!(Price::from_dinars(11) * 2, Price::from_dinars(22));
    }

    #[test]
    fn test_size_label_ignores_whitespace() {
        assert_eq!(SizeLabel::new("1/4 m"), SizeLabel::new("1/4m"));
        assert_eq!(SizeLabel::new("  Petit ").unwrap().as_str(), "Petit");
        assert!(SizeLabel::new("   ").is_none());
        assert!(SizeLabel::new("").is_none());
    }

    #[test]
    fn test_parse_size_list() {
        let variants =
            parse_size_list("Petit 9dt - Moyen 12dt - Large 15dt - 1/4m 12dt - 1/2m 24dt - 1m 48dt")
                .unwrap();
        let labels: Vec<&str> = variants.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, vec!["Petit", "Moyen", "Large", "1/4m", "1/2m", "1m"]);
        assert_eq!(variants[3].1, Price::from_dinars(12));
    }

    #[test]
    fn test_parse_size_list_rejects_bad_segments() {
        assert!(parse_size_list("Petit - Moyen 12dt").is_err());
        assert!(parse_size_list("Petit 9dt - Petit 10dt").is_err());
        assert!(parse_size_list("Petit nine").is_err());
    }

    #[test]
    fn test_cart_keys() {
        let margherita = ItemId::new("margherita").unwrap();
        let tuna = ItemId::new("tuna").unwrap();
        let half = SizeLabel::new("1/2m").unwrap();

        assert_eq!(CartKey::unit(&margherita).to_string(), "margherita");
        assert_eq!(
            CartKey::sized(&margherita, &SizeLabel::new("Petit").unwrap()).to_string(),
            "margherita:Petit"
        );
        assert_eq!(
            CartKey::combined(&half, &[tuna.clone(), margherita.clone()], false),
            CartKey::combined(&half, &[margherita.clone(), tuna.clone()], false)
        );

        let supplemented = CartKey::combined(&half, &[tuna.clone(), margherita.clone()], true);
        assert_ne!(supplemented, CartKey::combined(&half, &[tuna, margherita], false));
        assert_eq!(supplemented.to_string(), "1/2m+sup:margherita+tuna");
    }

    #[test]
    fn test_unit_and_sized_keys_never_collide() {
        let colon_id = ItemId::new("a:b").unwrap();
        let sized = CartKey::sized(&ItemId::new("a").unwrap(), &SizeLabel::new("b").unwrap());

        assert_ne!(CartKey::unit(&colon_id), sized);
        // the rendered text may coincide; identity does not
        assert_eq!(CartKey::unit(&colon_id).to_string(), sized.to_string());
    }

    #[test]
    fn test_item_id_rejects_blank() {
        assert!(ItemId::new("  ").is_err());
        assert_eq!(ItemId::new(" tuna ").unwrap().as_str(), "tuna");
    }
}
