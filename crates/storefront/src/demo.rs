//! Built-in demo artisans shown alongside remote profiles.

use artisan_market_core::ArtisanProfile;
use artisan_market_core::catalog::parse_profiles;
use serde_json::json;

/// Demo artisans, normalized the same way as remote profiles.
///
/// Materials are list-shaped here, unlike remote records, so the category
/// filter matches them by material.
#[must_use]
pub fn demo_artisans() -> Vec<ArtisanProfile> {
    parse_profiles(&json!({
        "user_profiles": [
            {
                "id": "demo-ravi-kumar",
                "name": "Ravi Kumar",
                "craft_type": "Traditional Blue Pottery",
                "location": "Jaipur, Rajasthan",
                "years_experience": 18,
                "materials": ["Quartz clay", "Cobalt oxide", "Glass frit"],
                "backstory": "Learned blue pottery from his grandfather in the lanes of Jaipur.\n\nTagline: Rajasthan's sky, fired in clay",
                "products": [
                    {
                        "id": "demo-ravi-vase",
                        "title": "Cobalt Floral Vase",
                        "price": 1850,
                        "category": "pottery",
                        "isNew": true,
                        "description": "Hand-painted vase with Mughal floral motifs."
                    },
                    {
                        "id": "demo-ravi-plates",
                        "title": "Blue Pottery Plate Set",
                        "price": 2400,
                        "category": "pottery",
                        "description": "Set of four quartz-clay plates."
                    }
                ]
            },
            {
                "id": "demo-priyanka-sharma",
                "name": "Priyanka Sharma",
                "craft_type": "Handloom Textiles",
                "location": "Varanasi, Uttar Pradesh",
                "years_experience": 12,
                "materials": ["Silk", "Cotton", "Zari thread"],
                "backstory": "Weaves Banarasi silk on a pit loom her family has kept for three generations.\n\nTagline: Every thread tells a story",
                "products": [
                    {
                        "id": "demo-priyanka-saree",
                        "title": "Banarasi Silk Saree",
                        "price": 12500,
                        "category": "textiles",
                        "isNew": true,
                        "description": "Pure silk saree with zari border."
                    },
                    {
                        "id": "demo-priyanka-stole",
                        "title": "Handwoven Cotton Stole",
                        "price": 950,
                        "category": "textiles",
                        "description": "Lightweight stole in natural dyes."
                    }
                ]
            },
            {
                "id": "demo-meena-devi",
                "name": "Meena Devi",
                "craft_type": "Sikki Grass Weaving",
                "location": "Madhubani, Bihar",
                "years_experience": 25,
                "materials": ["Golden grass", "Natural dyes"],
                "backstory": "Turns golden sikki grass into baskets and figurines.",
                "products": [
                    {
                        "id": "demo-meena-basket",
                        "title": "Golden Grass Basket",
                        "price": 700,
                        "category": "golden",
                        "description": "Lidded basket coiled from sikki grass."
                    }
                ]
            },
            {
                "id": "demo-arjun-das",
                "name": "Arjun Das",
                "craft_type": "Wood Carving",
                "location": "Saharanpur, Uttar Pradesh",
                "years_experience": 9,
                "materials": ["Sheesham wood", "Woodwork inlay", "Brass"],
                "backstory": "Carves sheesham panels with brass inlay.",
                "products": [
                    {
                        "id": "demo-arjun-box",
                        "title": "Inlaid Jewellery Box",
                        "price": 1600,
                        "category": "woodwork",
                        "isNew": true,
                        "description": "Sheesham box with brass inlay lid."
                    }
                ]
            }
        ]
    }))
}
