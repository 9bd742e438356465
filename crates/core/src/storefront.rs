//! Static landing-page content for the public storefront.
//!
//! Hero slides and featured tiles are editorial copy rather than catalog
//! rows, so they live here instead of in the database. Product showcase
//! tabs are filled from the catalog at request time.

use serde::{Deserialize, Serialize};

/// Seconds each hero slide stays on screen before advancing.
pub const HERO_ROTATION_SECS: u64 = 6;

/// Products shown per showcase tab.
pub const SHOWCASE_LIMIT: i64 = 4;

#[derive(Debug, Clone, Serialize)]
pub struct HeroSlide {
    pub id: u32,
    pub image: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub season: &'static str,
    pub cta: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeaturedTile {
    pub id: u32,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub image: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

/// Tabs of the "Featured Products" showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowcaseTab {
    Bestsellers,
    NewArrivals,
}

impl ShowcaseTab {
    pub const ALL: [ShowcaseTab; 2] = [ShowcaseTab::Bestsellers, ShowcaseTab::NewArrivals];

    pub fn label(self) -> &'static str {
        match self {
            ShowcaseTab::Bestsellers => "Best Sellers",
            ShowcaseTab::NewArrivals => "New Arrivals",
        }
    }
}

pub fn hero_slides() -> Vec<HeroSlide> {
    vec![
        HeroSlide {
            id: 1,
            image: "storefront/hero-summer-collection",
            title: "Summer Lawn Collection 2024",
            subtitle: "Breathable Cotton & Premium Lawn",
            description: "Discover our exquisite summer collection featuring lightweight \
                          fabrics perfect for Pakistan's warm climate.",
            season: "summer",
            cta: "Shop Summer Collection",
        },
        HeroSlide {
            id: 2,
            image: "storefront/hero-winter-collection",
            title: "Winter Khaddar Collection",
            subtitle: "Luxurious Warmth & Traditional Elegance",
            description: "Embrace the winter season with our premium khaddar and wool \
                          blend fabrics.",
            season: "winter",
            cta: "Shop Winter Collection",
        },
    ]
}

/// Index of the slide shown after `current`, wrapping around.
pub fn next_slide(current: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        (current + 1) % total
    }
}

/// Index of the slide shown before `current`, wrapping around.
pub fn previous_slide(current: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        (current + total - 1) % total
    }
}

pub fn featured_tiles() -> Vec<FeaturedTile> {
    vec![
        FeaturedTile {
            id: 1,
            title: "Men's Collection",
            subtitle: "Traditional & Modern Styles",
            image: "storefront/men-formal",
            description: "From formal shalwar kameez to casual kurtas",
            link: "/shop/men",
        },
        FeaturedTile {
            id: 2,
            title: "Women's Collection",
            subtitle: "Elegant & Contemporary",
            image: "storefront/women-formal",
            description: "Lawn, silk, and premium fabric ensembles",
            link: "/shop/women",
        },
        FeaturedTile {
            id: 3,
            title: "Premium Fabrics",
            subtitle: "Quality Materials",
            image: "storefront/fabric-collection",
            description: "Cotton, Lawn, Khaddar, Silk & More",
            link: "/shop/fabrics",
        },
    ]
}
