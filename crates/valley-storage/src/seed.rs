//! The Community Center catalogue: 30 bundles across six rooms.
//!
//! Seeding is idempotent. It only runs against an empty store, and every
//! insert is `OR IGNORE`.

use rusqlite::Connection;

use valley_core::errors::{StorageError, ValleyResult};
use valley_core::models::{Bundle, Item};

use crate::queries::bundle_ops;

/// (id, name, quality) of one catalogue item.
type ItemRow = (&'static str, &'static str, Option<&'static str>);

/// (id, name, room, required_items, items) of one catalogue bundle.
type BundleRow = (&'static str, &'static str, &'static str, u32, &'static [ItemRow]);

const fn plain(id: &'static str, name: &'static str) -> ItemRow {
    (id, name, None)
}

const fn gold(id: &'static str, name: &'static str) -> ItemRow {
    (id, name, Some("gold"))
}

const CATALOGUE: &[BundleRow] = &[
    // Pantry
    ("spring_crops", "Spring Crops Bundle", "Pantry", 4, &[
        plain("spring_parsnip", "Parsnip"),
        plain("spring_green_bean", "Green Bean"),
        plain("spring_cauliflower", "Cauliflower"),
        plain("spring_potato", "Potato"),
    ]),
    ("summer_crops", "Summer Crops Bundle", "Pantry", 4, &[
        plain("summer_tomato", "Tomato"),
        plain("summer_hot_pepper", "Hot Pepper"),
        plain("summer_blueberry", "Blueberry"),
        plain("summer_melon", "Melon"),
    ]),
    ("fall_crops", "Fall Crops Bundle", "Pantry", 4, &[
        plain("fall_corn", "Corn"),
        plain("fall_eggplant", "Eggplant"),
        plain("fall_pumpkin", "Pumpkin"),
        plain("fall_yam", "Yam"),
    ]),
    ("quality_crops", "Quality Crops Bundle", "Pantry", 3, &[
        gold("quality_parsnip", "Parsnip"),
        gold("quality_melon", "Melon"),
        gold("quality_pumpkin", "Pumpkin"),
        gold("quality_corn", "Corn"),
    ]),
    ("animal", "Animal Bundle", "Pantry", 5, &[
        plain("animal_large_milk", "Large Milk"),
        plain("animal_large_egg_brown", "Large Brown Egg"),
        plain("animal_large_egg_white", "Large Egg"),
        plain("animal_large_goat_milk", "Large Goat Milk"),
        plain("animal_wool", "Wool"),
        plain("animal_duck_egg", "Duck Egg"),
    ]),
    ("artisan", "Artisan Bundle", "Pantry", 6, &[
        plain("artisan_truffle_oil", "Truffle Oil"),
        plain("artisan_cloth", "Cloth"),
        plain("artisan_goat_cheese", "Goat Cheese"),
        plain("artisan_cheese", "Cheese"),
        plain("artisan_honey", "Honey"),
        plain("artisan_jelly", "Jelly"),
        plain("artisan_apple", "Apple"),
        plain("artisan_apricot", "Apricot"),
        plain("artisan_orange", "Orange"),
        plain("artisan_peach", "Peach"),
        plain("artisan_pomegranate", "Pomegranate"),
        plain("artisan_cherry", "Cherry"),
    ]),
    // Crafts Room
    ("spring_foraging", "Spring Foraging Bundle", "Crafts Room", 4, &[
        plain("forage_wild_horseradish", "Wild Horseradish"),
        plain("forage_daffodil", "Daffodil"),
        plain("forage_leek", "Leek"),
        plain("forage_dandelion", "Dandelion"),
    ]),
    ("summer_foraging", "Summer Foraging Bundle", "Crafts Room", 3, &[
        plain("forage_grape", "Grape"),
        plain("forage_spice_berry", "Spice Berry"),
        plain("forage_sweet_pea", "Sweet Pea"),
    ]),
    ("fall_foraging", "Fall Foraging Bundle", "Crafts Room", 4, &[
        plain("forage_common_mushroom", "Common Mushroom"),
        plain("forage_wild_plum", "Wild Plum"),
        plain("forage_hazelnut", "Hazelnut"),
        plain("forage_blackberry", "Blackberry"),
    ]),
    ("winter_foraging", "Winter Foraging Bundle", "Crafts Room", 4, &[
        plain("forage_winter_root", "Winter Root"),
        plain("forage_crystal_fruit", "Crystal Fruit"),
        plain("forage_snow_yam", "Snow Yam"),
        plain("forage_crocus", "Crocus"),
    ]),
    ("construction", "Construction Bundle", "Crafts Room", 4, &[
        plain("construction_wood", "Wood (99)"),
        plain("construction_stone", "Stone (99)"),
        plain("construction_hardwood", "Hardwood (10)"),
        plain("construction_clay", "Clay (10)"),
    ]),
    ("exotic_foraging", "Exotic Foraging Bundle", "Crafts Room", 5, &[
        plain("exotic_coconut", "Coconut"),
        plain("exotic_cactus_fruit", "Cactus Fruit"),
        plain("exotic_cave_carrot", "Cave Carrot"),
        plain("exotic_red_mushroom", "Red Mushroom"),
        plain("exotic_purple_mushroom", "Purple Mushroom"),
        plain("exotic_maple_syrup", "Maple Syrup"),
        plain("exotic_oak_resin", "Oak Resin"),
        plain("exotic_pine_tar", "Pine Tar"),
        plain("exotic_morel", "Morel"),
    ]),
    // Fish Tank
    ("river_fish", "River Fish Bundle", "Fish Tank", 4, &[
        plain("fish_sunfish", "Sunfish"),
        plain("fish_catfish", "Catfish"),
        plain("fish_shad", "Shad"),
        plain("fish_tiger_trout", "Tiger Trout"),
    ]),
    ("lake_fish", "Lake Fish Bundle", "Fish Tank", 4, &[
        plain("fish_largemouth_bass", "Largemouth Bass"),
        plain("fish_carp", "Carp"),
        plain("fish_bullhead", "Bullhead"),
        plain("fish_sturgeon", "Sturgeon"),
    ]),
    ("ocean_fish", "Ocean Fish Bundle", "Fish Tank", 4, &[
        plain("fish_sardine", "Sardine"),
        plain("fish_tuna", "Tuna"),
        plain("fish_red_snapper", "Red Snapper"),
        plain("fish_tilapia", "Tilapia"),
    ]),
    ("night_fishing", "Night Fishing Bundle", "Fish Tank", 3, &[
        plain("fish_walleye", "Walleye"),
        plain("fish_bream", "Bream"),
        plain("fish_eel", "Eel"),
    ]),
    ("specialty_fish", "Specialty Fish Bundle", "Fish Tank", 4, &[
        plain("fish_pufferfish", "Pufferfish"),
        plain("fish_ghostfish", "Ghostfish"),
        plain("fish_sandfish", "Sandfish"),
        plain("fish_woodskip", "Woodskip"),
    ]),
    ("crab_pot", "Crab Pot Bundle", "Fish Tank", 5, &[
        plain("crab_lobster", "Lobster"),
        plain("crab_crayfish", "Crayfish"),
        plain("crab_crab", "Crab"),
        plain("crab_cockle", "Cockle"),
        plain("crab_mussel", "Mussel"),
        plain("crab_shrimp", "Shrimp"),
        plain("crab_snail", "Snail"),
        plain("crab_periwinkle", "Periwinkle"),
        plain("crab_oyster", "Oyster"),
        plain("crab_clam", "Clam"),
    ]),
    // Boiler Room
    ("blacksmith", "Blacksmith's Bundle", "Boiler Room", 3, &[
        plain("blacksmith_copper_bar", "Copper Bar"),
        plain("blacksmith_iron_bar", "Iron Bar"),
        plain("blacksmith_gold_bar", "Gold Bar"),
    ]),
    ("geologist", "Geologist's Bundle", "Boiler Room", 4, &[
        plain("geo_quartz", "Quartz"),
        plain("geo_earth_crystal", "Earth Crystal"),
        plain("geo_frozen_tear", "Frozen Tear"),
        plain("geo_fire_quartz", "Fire Quartz"),
    ]),
    ("adventurer", "Adventurer's Bundle", "Boiler Room", 2, &[
        plain("adv_slime", "Slime (99)"),
        plain("adv_bat_wing", "Bat Wing (10)"),
        plain("adv_solar_essence", "Solar Essence"),
        plain("adv_void_essence", "Void Essence"),
    ]),
    // Bulletin Board
    ("chef", "Chef's Bundle", "Bulletin Board", 6, &[
        plain("chef_maple_syrup", "Maple Syrup"),
        plain("chef_fiddlehead_fern", "Fiddlehead Fern"),
        plain("chef_truffle", "Truffle"),
        plain("chef_poppy", "Poppy"),
        plain("chef_maki_roll", "Maki Roll"),
        plain("chef_fried_egg", "Fried Egg"),
    ]),
    ("dye", "Dye Bundle", "Bulletin Board", 6, &[
        plain("dye_red_mushroom", "Red Mushroom"),
        plain("dye_sea_urchin", "Sea Urchin"),
        plain("dye_sunflower", "Sunflower"),
        plain("dye_duck_feather", "Duck Feather"),
        plain("dye_aquamarine", "Aquamarine"),
        plain("dye_red_cabbage", "Red Cabbage"),
    ]),
    ("field_research", "Field Research Bundle", "Bulletin Board", 4, &[
        plain("field_purple_mushroom", "Purple Mushroom"),
        plain("field_nautilus_shell", "Nautilus Shell"),
        plain("field_chub", "Chub"),
        plain("field_frozen_geode", "Frozen Geode"),
    ]),
    ("fodder", "Fodder Bundle", "Bulletin Board", 3, &[
        plain("fodder_wheat", "Wheat (10)"),
        plain("fodder_hay", "Hay (10)"),
        plain("fodder_apple", "Apple (3)"),
    ]),
    ("enchanter", "Enchanter's Bundle", "Bulletin Board", 4, &[
        plain("ench_oak_resin", "Oak Resin"),
        plain("ench_wine", "Wine"),
        plain("ench_rabbit_foot", "Rabbit's Foot"),
        plain("ench_pomegranate", "Pomegranate"),
    ]),
    // Vault
    ("vault_2500", "2,500g Bundle", "Vault", 1, &[plain("vault_2500g", "2,500g")]),
    ("vault_5000", "5,000g Bundle", "Vault", 1, &[plain("vault_5000g", "5,000g")]),
    ("vault_10000", "10,000g Bundle", "Vault", 1, &[plain("vault_10000g", "10,000g")]),
    ("vault_25000", "25,000g Bundle", "Vault", 1, &[plain("vault_25000g", "25,000g")]),
];

/// The full catalogue as bundles with items, every item missing.
pub fn catalogue() -> Vec<Bundle> {
    CATALOGUE
        .iter()
        .map(|&(id, name, room, required, items)| {
            let items = items
                .iter()
                .map(|&(item_id, item_name, quality)| {
                    let item = Item::new(item_id, id, item_name);
                    match quality {
                        Some(q) => item.with_quality(q),
                        None => item,
                    }
                })
                .collect();
            Bundle::new(id, name, room, required).with_items(items)
        })
        .collect()
}

/// Insert the catalogue unless the store already holds bundles.
/// Returns the number of bundles inserted.
pub fn seed_if_empty(conn: &Connection) -> ValleyResult<usize> {
    if bundle_ops::count_bundles(conn)? > 0 {
        tracing::debug!("store already seeded, skipping");
        return Ok(0);
    }

    let bundles = catalogue();
    for bundle in &bundles {
        bundle_ops::insert_bundle_with_items(conn, bundle).map_err(|e| {
            StorageError::SeedFailed {
                bundle_id: bundle.id.clone(),
                reason: e.to_string(),
            }
        })?;
    }
    tracing::info!(bundles = bundles.len(), "seeded Community Center catalogue");
    Ok(bundles.len())
}
