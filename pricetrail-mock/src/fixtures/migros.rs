use pricetrail_core::Item;

use super::item;

// Returned newest first; "water" is listed under two categories.
pub fn captures() -> Vec<(&'static str, Vec<Item>)> {
    vec![
        (
            "211108_120000",
            vec![
                item("tea", 1975, "drinks"),
                item("coffee", 8900, "drinks"),
                item("water", 550, "drinks"),
                item("water", 1200, "baby"),
            ],
        ),
        (
            "211103_120000",
            vec![
                item("tea", 1850, "drinks"),
                item("coffee", 8900, "drinks"),
                item("water", 500, "drinks"),
                item("oat milk", 3400, "vegan"),
            ],
        ),
        (
            "211101_120000",
            vec![
                item("tea", 1850, "drinks"),
                item("coffee", 9250, "drinks"),
                item("oat milk", 3400, "vegan"),
            ],
        ),
    ]
}

pub fn live() -> Vec<Item> {
    vec![
        item("tea", 1975, "drinks"),
        item("coffee", 8500, "drinks"),
        item("water", 550, "drinks"),
    ]
}
