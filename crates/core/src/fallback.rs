//! Compiled-in placeholder content served by the public listings while the
//! real collections are still empty.
//!
//! The entries are plain data; the db crate turns them into its row models
//! (with synthetic negative ids) so they flow through the same projection as
//! persisted records.

/// A placeholder gallery image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackGalleryEntry {
    pub slug: &'static str,
    pub image_url: &'static str,
    pub category: &'static str,
    pub caption: &'static str,
}

/// A placeholder menu dish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackMenuEntry {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub category: &'static str,
    pub image_url: Option<&'static str>,
}

/// Public gallery placeholders, newest first.
pub const FALLBACK_GALLERY: &[FallbackGalleryEntry] = &[
    FallbackGalleryEntry {
        slug: "fallback-hero-dining",
        image_url: "/assets/hero-dining.jpg",
        category: "Interior",
        caption: "Elegant dining setup bathed in warm candlelight",
    },
    FallbackGalleryEntry {
        slug: "fallback-restaurant-interior",
        image_url: "/assets/restaurant-interior.jpg",
        category: "Interior",
        caption: "Our cozy lounge perfect for intimate conversations",
    },
    FallbackGalleryEntry {
        slug: "fallback-food-main",
        image_url: "/assets/food-main.jpg",
        category: "Food",
        caption: "Signature sea bass with saffron risotto",
    },
    FallbackGalleryEntry {
        slug: "fallback-food-starter",
        image_url: "/assets/food-starter.jpg",
        category: "Food",
        caption: "Starter trio featuring seasonal ingredients",
    },
    FallbackGalleryEntry {
        slug: "fallback-food-dessert",
        image_url: "/assets/food-dessert.jpg",
        category: "Food",
        caption: "Decadent desserts to end the night sweetly",
    },
    FallbackGalleryEntry {
        slug: "fallback-moments-dining",
        image_url: "/assets/food-main.jpg",
        category: "Moments",
        caption: "Memorable celebrations hosted with style",
    },
    FallbackGalleryEntry {
        slug: "fallback-terrace",
        image_url: "/assets/hero-dining.jpg",
        category: "Interior",
        caption: "Starlit terrace open for relaxed evenings",
    },
    FallbackGalleryEntry {
        slug: "fallback-bar",
        image_url: "/assets/restaurant-interior.jpg",
        category: "Moments",
        caption: "Mixology crafted at our intimate bar",
    },
];

/// Public menu placeholders, in display order.
pub const FALLBACK_MENU: &[FallbackMenuEntry] = &[
    FallbackMenuEntry {
        slug: "fallback-starters-1",
        name: "Bruschetta Trio",
        description: "Toasted baguette topped with tomato basil, wild mushroom, and olive tapenade",
        price: 1200.0,
        category: "starters",
        image_url: Some("/assets/food-starter.jpg"),
    },
    FallbackMenuEntry {
        slug: "fallback-starters-2",
        name: "Prawn Ceviche",
        description: "Citrus-marinated prawns, avocado, pickled shallots, and micro herbs",
        price: 1650.0,
        category: "starters",
        image_url: Some("/assets/food-starter.jpg"),
    },
    FallbackMenuEntry {
        slug: "fallback-starters-3",
        name: "Roasted Pumpkin Soup",
        description: "Silky pumpkin velouté with coconut cream and toasted pepitas",
        price: 980.0,
        category: "starters",
        image_url: Some("/assets/food-starter.jpg"),
    },
    FallbackMenuEntry {
        slug: "fallback-mains-1",
        name: "Grilled Sea Bass",
        description: "Pan-seared sea bass, saffron risotto, blistered cherry tomatoes",
        price: 3200.0,
        category: "mains",
        image_url: Some("/assets/food-main.jpg"),
    },
    FallbackMenuEntry {
        slug: "fallback-mains-2",
        name: "Herb-Crusted Lamb",
        description: "New Zealand lamb rack, rosemary jus, truffle mash, glazed baby carrots",
        price: 3850.0,
        category: "mains",
        image_url: Some("/assets/food-main.jpg"),
    },
    FallbackMenuEntry {
        slug: "fallback-mains-3",
        name: "Flamingo Signature Pasta",
        description: "Handmade fettuccine with lobster tail, garlic confit, and chili butter",
        price: 2650.0,
        category: "mains",
        image_url: Some("/assets/food-main.jpg"),
    },
    FallbackMenuEntry {
        slug: "fallback-desserts-1",
        name: "Chocolate Lava Cake",
        description: "Molten dark chocolate centre with vanilla bean ice cream",
        price: 890.0,
        category: "desserts",
        image_url: Some("/assets/food-dessert.jpg"),
    },
    FallbackMenuEntry {
        slug: "fallback-desserts-2",
        name: "Rose Panna Cotta",
        description: "Fragrant rose panna cotta, berry compote, pistachio crumble",
        price: 820.0,
        category: "desserts",
        image_url: Some("/assets/food-dessert.jpg"),
    },
    FallbackMenuEntry {
        slug: "fallback-desserts-3",
        name: "Tropical Pavlova",
        description: "Coconut meringue, passionfruit curd, seasonal tropical fruit",
        price: 760.0,
        category: "desserts",
        image_url: Some("/assets/food-dessert.jpg"),
    },
    FallbackMenuEntry {
        slug: "fallback-beverages-1",
        name: "Flamingo Sunrise Mocktail",
        description: "Guava, pineapple, grenadine, and lime over crushed ice",
        price: 650.0,
        category: "beverages",
        image_url: None,
    },
    FallbackMenuEntry {
        slug: "fallback-beverages-2",
        name: "Cold Brew Tonic",
        description: "Single-origin cold brew, citrus peel, and artisanal tonic",
        price: 580.0,
        category: "beverages",
        image_url: None,
    },
    FallbackMenuEntry {
        slug: "fallback-beverages-3",
        name: "Classic Espresso Martini",
        description: "Espresso, vanilla, and roasted cacao bitters",
        price: 1100.0,
        category: "beverages",
        image_url: None,
    },
    FallbackMenuEntry {
        slug: "fallback-beverages-4",
        name: "Ceylon Spiced Chai",
        description: "Hand-ground spices simmered with premium Ceylon black tea",
        price: 540.0,
        category: "beverages",
        image_url: None,
    },
];
