//! Deterministic itineraries used when the model is unavailable or its
//! answer cannot be parsed.
//!
//! A destination containing a known keyword gets a curated guide: the first
//! three days have hand-written content, later days repeat an "Exploring"
//! template. Anything else gets a generic plan built from the destination
//! name and day index alone. Nothing here does I/O or can fail.

use crate::models::itinerary::{Activity, Day, Itinerary, TimeBlock};
use crate::models::trip::TripRequest;

const CURATED_DAYS: usize = 3;
const MORNING_TIME: &str = "9:00 AM - 12:00 PM";
const AFTERNOON_TIME: &str = "2:00 PM - 5:00 PM";
const EVENING_TIME: &str = "7:00 PM - 10:00 PM";

/// One time block across the day indices. Index 3 is used for every day
/// past the curated ones.
struct SlotTemplate {
    titles: [&'static str; 4],
    locations: [&'static str; 4],
    description: &'static str,
}

impl SlotTemplate {
    fn activity(&self, day_index: usize, time: &str) -> Activity {
        let i = day_index.min(CURATED_DAYS);
        Activity {
            title: self.titles[i].to_string(),
            description: self.description.to_string(),
            location: Some(self.locations[i].to_string()),
            time: Some(time.to_string()),
        }
    }
}

struct DestinationGuide {
    keywords: &'static [&'static str],
    short_name: &'static str,
    day_themes: [&'static str; CURATED_DAYS],
    morning: SlotTemplate,
    afternoon: SlotTemplate,
    evening: SlotTemplate,
    tips: &'static [&'static str],
    must_see: &'static [&'static str],
    food: &'static [&'static str],
}

impl DestinationGuide {
    fn matches(&self, destination_lower: &str) -> bool {
        self.keywords.iter().any(|k| destination_lower.contains(k))
    }

    fn day_title(&self, day_index: usize) -> String {
        match self.day_themes.get(day_index) {
            Some(theme) => format!("Day {} - {}", day_index + 1, theme),
            None => format!("Day {} - Exploring {}", day_index + 1, self.short_name),
        }
    }
}

static PARIS: DestinationGuide = DestinationGuide {
    keywords: &["paris", "france"],
    short_name: "Paris",
    day_themes: ["Welcome to Paris", "Art and Culture", "Parisian Lifestyle"],
    morning: SlotTemplate {
        titles: [
            "Eiffel Tower Visit",
            "Louvre Museum",
            "Montmartre Walk",
            "Café and Croissants",
        ],
        locations: [
            "Champ de Mars, 5 Avenue Anatole France",
            "Rue de Rivoli, 75001 Paris",
            "Montmartre, 75018 Paris",
            "Local Parisian Café",
        ],
        description: "Experience the iconic symbol of Paris with breathtaking views of the city.",
    },
    afternoon: SlotTemplate {
        titles: [
            "Seine River Cruise",
            "Notre-Dame Cathedral",
            "Luxembourg Gardens",
            "Shopping at Champs-Élysées",
        ],
        locations: [
            "Seine River, Departure near Eiffel Tower",
            "6 Parvis Notre-Dame - Pl. Jean-Paul II, 75004",
            "6e Arrondissement, 75006 Paris",
            "Avenue des Champs-Élysées, 75008 Paris",
        ],
        description: "Enjoy Paris from a different perspective with a scenic river cruise.",
    },
    evening: SlotTemplate {
        titles: [
            "Dinner at Montparnasse",
            "Evening at Moulin Rouge",
            "Fine Dining Experience",
            "Parisian Night Walk",
        ],
        locations: [
            "Avenue du Maine, 75015 Paris",
            "82 Boulevard de Clichy, 75018 Paris",
            "Le Marais district",
            "Along the Seine River",
        ],
        description:
            "Enjoy authentic French cuisine with a view of the illuminated Eiffel Tower.",
    },
    tips: &[
        "Learn a few basic French phrases - locals appreciate the effort",
        "Many museums are free on the first Sunday of each month",
        "The Paris Museum Pass can save you money if you plan to visit multiple sites",
        "Be aware of pickpockets, especially in crowded tourist areas",
        "Restaurants often have fixed price menus (prix fixe) which offer good value",
        "Consider buying a carnet of 10 metro tickets to save money on transportation",
    ],
    must_see: &[
        "Eiffel Tower - Iconic symbol of Paris",
        "Louvre Museum - Home to thousands of works of art, including the Mona Lisa",
        "Notre-Dame Cathedral - Masterpiece of French Gothic architecture",
        "Champs-Élysées and Arc de Triomphe - Famous avenue and monument",
        "Montmartre and Sacré-Cœur - Artistic neighborhood with stunning basilica",
    ],
    food: &[
        "Croissants and Pain au Chocolat - Must try from a local bakery",
        "Boeuf Bourguignon - Classic French beef stew",
        "Escargot - Snails prepared with garlic and butter",
        "Macarons - Try these colorful confections from Ladurée or Pierre Hermé",
        "Cheese and Wine - Experience a traditional French cheese board with local wine",
    ],
};

static NEW_YORK: DestinationGuide = DestinationGuide {
    keywords: &["new york", "nyc"],
    short_name: "NYC",
    day_themes: [
        "Manhattan Highlights",
        "Arts and Culture",
        "New York Neighborhoods",
    ],
    morning: SlotTemplate {
        titles: [
            "Empire State Building",
            "Metropolitan Museum of Art",
            "Brooklyn Bridge Walk",
            "New York Bagels and Coffee",
        ],
        locations: [
            "350 Fifth Avenue, Manhattan",
            "1000 Fifth Avenue, Manhattan",
            "Brooklyn Bridge, Start at City Hall Park",
            "Local NYC Café",
        ],
        description:
            "Experience panoramic views from one of New York's most iconic buildings.",
    },
    afternoon: SlotTemplate {
        titles: [
            "Central Park Exploration",
            "American Museum of Natural History",
            "High Line and Chelsea Market",
            "Shopping in SoHo",
        ],
        locations: [
            "Central Park, Manhattan",
            "200 Central Park West, Manhattan",
            "The High Line, Start at Gansevoort Street",
            "SoHo, Manhattan",
        ],
        description:
            "Enjoy the green heart of Manhattan with various attractions inside the park.",
    },
    evening: SlotTemplate {
        titles: [
            "Times Square Night Experience",
            "Broadway Show",
            "Dinner in Little Italy",
            "Rooftop Bar Experience",
        ],
        locations: [
            "Times Square, Manhattan",
            "Broadway Theatre District, Manhattan",
            "Little Italy, Manhattan",
            "Manhattan Rooftop Bar",
        ],
        description: "Be dazzled by the bright lights and energy of Times Square at night.",
    },
    tips: &[
        "Purchase a MetroCard for unlimited subway and bus trips during your stay",
        "Many museums have 'pay what you wish' times - check their websites",
        "Consider the New York CityPASS if you plan to visit multiple attractions",
        "Comfortable walking shoes are essential - New Yorkers walk everywhere",
        "Tipping 15-20% is customary in restaurants",
        "Take advantage of free Staten Island Ferry for views of the Statue of Liberty",
    ],
    must_see: &[
        "Empire State Building - Iconic Art Deco skyscraper with observation deck",
        "Central Park - Urban oasis with walking paths, lakes, and attractions",
        "Statue of Liberty and Ellis Island - Symbols of American freedom and immigration",
        "Times Square - The bright and bustling heart of Manhattan",
        "Metropolitan Museum of Art - One of the world's largest and finest art museums",
    ],
    food: &[
        "New York Pizza - Fold it like a local when eating a slice",
        "Bagel with Lox and Cream Cheese - Breakfast classic",
        "Pastrami on Rye from a classic deli like Katz's",
        "Food cart hot dogs and pretzels - Street food staples",
        "Cheesecake from Junior's or another famous bakery",
    ],
};

static GUIDES: [&DestinationGuide; 2] = [&PARIS, &NEW_YORK];

static GENERIC_MORNING: SlotTemplate = SlotTemplate {
    titles: [
        "City Introduction Tour",
        "Local Museum Visit",
        "Landmark Exploration",
        "Morning Cultural Activity",
    ],
    locations: [
        "City Center",
        "National Museum",
        "Famous Landmark",
        "Cultural District",
    ],
    description: "Start your trip with an overview of the main attractions and history.",
};

static GENERIC_AFTERNOON: SlotTemplate = SlotTemplate {
    titles: [
        "Local Market Visit",
        "Park and Gardens",
        "Shopping District",
        "Afternoon Leisure",
    ],
    locations: ["Central Market", "City Park", "Shopping Area", "Leisure District"],
    description: "Experience local life and cuisine at the central market.",
};

static GENERIC_EVENING: SlotTemplate = SlotTemplate {
    titles: [
        "Welcome Dinner",
        "Cultural Performance",
        "Local Cuisine Experience",
        "Evening Entertainment",
    ],
    locations: [
        "Restaurant District",
        "Cultural Center",
        "Famous Restaurant",
        "Entertainment District",
    ],
    description: "Enjoy authentic local cuisine in a traditional setting.",
};

const GENERIC_TIPS: &[&str] = &[
    "Research local customs before your trip",
    "Learn a few basic phrases in the local language",
    "Check if your destination requires special travel insurance",
    "Keep a copy of important documents separate from originals",
    "Try to explore beyond just the tourist areas",
    "Use public transportation when possible to experience local life",
];

const GENERIC_MUST_SEE: &[&str] = &[
    "Historical City Center",
    "National Museum",
    "Local Market",
    "Famous Religious Site",
    "Natural Landmark",
];

const GENERIC_FOOD: &[&str] = &[
    "National signature dish",
    "Local street food specialty",
    "Regional dessert",
    "Traditional beverage",
    "Famous restaurant dish",
];

pub fn fallback_for_request(request: &TripRequest) -> Itinerary {
    fallback_itinerary(&request.destination, request.duration_days())
}

/// Builds `num_days` days for `destination`. A non-positive count gives an
/// empty day list; the tip, location and food lists are never empty.
pub fn fallback_itinerary(destination: &str, num_days: i64) -> Itinerary {
    let day_count = usize::try_from(num_days).unwrap_or(0);
    let lowered = destination.to_lowercase();

    match GUIDES.iter().find(|guide| guide.matches(&lowered)) {
        Some(guide) => curated_itinerary(guide, day_count),
        None => generic_itinerary(destination, day_count),
    }
}

fn curated_itinerary(guide: &DestinationGuide, day_count: usize) -> Itinerary {
    let days = (0..day_count)
        .map(|i| Day {
            title: guide.day_title(i),
            morning: TimeBlock::single(guide.morning.activity(i, MORNING_TIME)),
            afternoon: TimeBlock::single(guide.afternoon.activity(i, AFTERNOON_TIME)),
            evening: TimeBlock::single(guide.evening.activity(i, EVENING_TIME)),
        })
        .collect();

    Itinerary {
        days,
        tips: owned_list(guide.tips),
        must_see_locations: owned_list(guide.must_see),
        food_recommendations: owned_list(guide.food),
    }
}

fn generic_itinerary(destination: &str, day_count: usize) -> Itinerary {
    let days = (0..day_count)
        .map(|i| Day {
            title: format!("Day {} - {} Exploration", i + 1, destination),
            morning: TimeBlock::single(GENERIC_MORNING.activity(i, MORNING_TIME)),
            afternoon: TimeBlock::single(GENERIC_AFTERNOON.activity(i, AFTERNOON_TIME)),
            evening: TimeBlock::single(GENERIC_EVENING.activity(i, EVENING_TIME)),
        })
        .collect();

    Itinerary {
        days,
        tips: owned_list(GENERIC_TIPS),
        must_see_locations: owned_list(GENERIC_MUST_SEE),
        food_recommendations: owned_list(GENERIC_FOOD),
    }
}

fn owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
