use pricetrail_core::Item;

use super::item;

// 11-02 is captured twice (the later run wins by default) and eggs skip 11-04.
pub fn captures() -> Vec<(&'static str, Vec<Item>)> {
    vec![
        (
            "211101_093000",
            vec![
                item("milk", 1000, "dairy"),
                item("eggs", 300, "dairy"),
                item("bread", 450, "bakery"),
                item("milk", 1000, "dairy"),
            ],
        ),
        (
            "211102_093000",
            vec![
                item("milk", 1000, "dairy"),
                item("eggs", 325, "dairy"),
                item("bread", 450, "bakery"),
            ],
        ),
        (
            "211102_180000",
            vec![
                item("milk", 1050, "dairy"),
                item("eggs", 325, "dairy"),
                item("bread", 450, "bakery"),
            ],
        ),
        (
            "211104_093000",
            vec![
                item("milk", 1250, "dairy"),
                item("bread", 475, "bakery"),
                item("cheese", 4590, "dairy"),
            ],
        ),
        (
            "211105_093000",
            vec![
                item("milk", 1250, "dairy"),
                item("eggs", 310, "dairy"),
                item("bread", 475, "bakery"),
                item("cheese", 4590, "dairy"),
            ],
        ),
    ]
}

pub fn live() -> Vec<Item> {
    vec![
        item("milk", 1300, "dairy"),
        item("eggs", 310, "dairy"),
        item("bread", 475, "bakery"),
        item("eggs", 315, "dairy"),
        item("cheese", 4290, "dairy"),
    ]
}
