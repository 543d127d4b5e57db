//! Fixture catalogue served by the fake backend.

use grocer_core::types::{Filter, Item, ItemId};

const CATALOGUE: [(ItemId, &str); 25] = [
    (1, "Apple"),
    (2, "Banana"),
    (3, "Cherry"),
    (4, "Date"),
    (5, "Elderberry"),
    (6, "Fig"),
    (7, "Grape"),
    (8, "Honeydew"),
    (9, "Jackfruit"),
    (10, "Kiwi"),
    (11, "Lemon"),
    (12, "Mango"),
    (13, "Nectarine"),
    (14, "Orange"),
    (15, "Papaya"),
    (16, "Quince"),
    (17, "Raspberry"),
    (18, "Strawberry"),
    (19, "Tangerine"),
    (20, "Ugli"),
    (21, "Vanilla"),
    (22, "Watermelon"),
    (23, "Xylocarp"),
    (24, "Yuzu"),
    (25, "Zucchini Genovesi"),
];

/// Number of leading catalogue entries returned for `kind=fruits`.
const FRUIT_COUNT: usize = 10;

fn to_item(&(id, name): &(ItemId, &str)) -> Item {
    Item {
        id,
        name: name.to_string(),
    }
}

/// Items visible under the given filter.
///
/// There is no dedicated vegetables selection: `Vegetables` falls back to
/// the full catalogue, same as no filter at all.
pub fn list(filter: Option<Filter>) -> Vec<Item> {
    let take = match filter {
        Some(Filter::Fruits) => FRUIT_COUNT,
        Some(Filter::Vegetables) | None => CATALOGUE.len(),
    };
    CATALOGUE.iter().take(take).map(to_item).collect()
}

/// Look up a catalogue item by id.
pub fn find(id: ItemId) -> Option<Item> {
    CATALOGUE.iter().find(|(item_id, _)| *item_id == id).map(to_item)
}
