//! Retailer benchmark schemas. No hand-written SQL dialect exists for these;
//! spellings are derived from the primitive types.

use fivmgen_core::schema::AttrType::{Double, Int};
use fivmgen_core::schema::{Catalog, RelationSchema};

use crate::relation;

pub fn inventory() -> RelationSchema {
    relation(
        "Inventory",
        &[
            ("locn", Int),
            ("dateid", Int),
            ("ksn", Int),
            ("inventoryunits", Int),
        ],
        &["locn", "dateid", "ksn"],
    )
}

pub fn location() -> RelationSchema {
    relation(
        "Location",
        &[
            ("locn", Int),
            ("zip", Int),
            ("rgn_cd", Int),
            ("clim_zn_nbr", Int),
            ("tot_area_sq_ft", Int),
            ("sell_area_sq_ft", Int),
            ("avghhi", Int),
            ("supertargetdistance", Double),
            ("supertargetdrivetime", Double),
            ("targetdistance", Double),
            ("targetdrivetime", Double),
            ("walmartdistance", Double),
            ("walmartdrivetime", Double),
            ("walmartsupercenterdistance", Double),
            ("walmartsupercenterdrivetime", Double),
        ],
        &["locn"],
    )
}

pub fn census() -> RelationSchema {
    relation(
        "Census",
        &[
            ("zip", Int),
            ("population", Int),
            ("white", Int),
            ("asian", Int),
            ("pacific", Int),
            ("blackafrican", Int),
            ("medianage", Double),
            ("occupiedhouseunits", Int),
            ("houseunits", Int),
            ("families", Int),
            ("households", Int),
            ("husbwife", Int),
            ("males", Int),
            ("females", Int),
            ("householdschildren", Int),
            ("hispanic", Int),
        ],
        &["zip"],
    )
}

pub fn item() -> RelationSchema {
    relation(
        "Item",
        &[
            ("ksn", Int),
            ("subcategory", Int),
            ("category", Int),
            ("categoryCluster", Int),
            ("prize", Double),
        ],
        &["ksn"],
    )
}

pub fn weather() -> RelationSchema {
    relation(
        "Weather",
        &[
            ("locn", Int),
            ("dateid", Int),
            ("rain", Int),
            ("snow", Int),
            ("maxtemp", Int),
            ("mintemp", Int),
            ("meanwind", Double),
            ("thunder", Int),
        ],
        &["locn", "dateid"],
    )
}

/// Pre-joined Inventory/Weather/Location view of the 1Q1c experiment.
pub fn view_q2() -> RelationSchema {
    relation(
        "q2",
        &[
            ("ksn", Int),
            ("locn", Int),
            ("dateid", Int),
            ("maxtemp", Int),
            ("zip", Int),
            ("rain", Int),
        ],
        &["ksn"],
    )
}

/// Pre-joined Inventory/Item view of the 3Q1c experiment.
pub fn view_r3q2() -> RelationSchema {
    relation(
        "R3q2",
        &[
            ("ksn", Int),
            ("locn", Int),
            ("dateid", Int),
            ("price", Double),
            ("category", Int),
        ],
        &["ksn", "locn", "dateid"],
    )
}

pub fn catalog() -> Catalog {
    Catalog::new()
        .with(inventory())
        .with(location())
        .with(census())
        .with(item())
        .with(weather())
        .with(view_q2())
        .with(view_r3q2())
}
