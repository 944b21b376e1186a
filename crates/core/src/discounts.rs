//! Multi-buy discounts

use rustc_hash::FxHashMap;

use crate::{cart::CartLine, products::PromoFamily};

/// Units per complete multi-buy set (3-for-2).
pub const MULTI_BUY_GROUP_SIZE: u64 = 3;

/// Compute the multi-buy discount over the given cart lines.
///
/// Units are grouped by promotional family; every complete set of
/// [`MULTI_BUY_GROUP_SIZE`] units earns one free unit, charged against
/// the cheapest units in the family first. Lines without a family marker
/// never participate.
#[must_use]
pub fn multi_buy_discount(lines: &[CartLine]) -> u64 {
    let mut families: FxHashMap<PromoFamily, Vec<(u64, u64)>> = FxHashMap::default();

    for line in lines {
        if let Some(family) = line.promo_family {
            families
                .entry(family)
                .or_default()
                .push((line.price, u64::from(line.quantity)));
        }
    }

    families.into_values().map(family_discount).sum()
}

fn family_discount(mut priced_quantities: Vec<(u64, u64)>) -> u64 {
    let units: u64 = priced_quantities.iter().map(|(_, quantity)| quantity).sum();
    let mut free = units / MULTI_BUY_GROUP_SIZE;

    if free == 0 {
        return 0;
    }

    priced_quantities.sort_unstable();

    let mut discount = 0;

    for (price, quantity) in priced_quantities {
        if free == 0 {
            break;
        }

        let taken = free.min(quantity);
        discount += price * taken;
        free -= taken;
    }

    discount
}
