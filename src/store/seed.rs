//! Deterministic mock data the in-memory store starts with

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Journey, JourneyDay, JourneyStop, Photo, Place, User};

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .map(|n| n.and_utc())
        .unwrap_or_default()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Alex Rivera".into(),
            email: "alex@wanderlens.app".into(),
            avatar_url: Some("https://picsum.photos/seed/alex/200".into()),
            bio: Some("Chasing sunsets and street food.".into()),
            home_base: Some("Lisbon, Portugal".into()),
            joined_at: at(2023, 3, 14, 9),
        },
        User {
            id: 2,
            name: "Mei Tanaka".into(),
            email: "mei@wanderlens.app".into(),
            avatar_url: Some("https://picsum.photos/seed/mei/200".into()),
            bio: Some("Mountains first, coffee second.".into()),
            home_base: Some("Osaka, Japan".into()),
            joined_at: at(2023, 6, 2, 18),
        },
        User {
            id: 3,
            name: "Jonas Berg".into(),
            email: "jonas@wanderlens.app".into(),
            avatar_url: None,
            bio: None,
            home_base: Some("Bergen, Norway".into()),
            joined_at: at(2024, 1, 20, 12),
        },
    ]
}

pub fn photos() -> Vec<Photo> {
    vec![
        Photo {
            id: 1,
            user_id: 1,
            image_url: "https://picsum.photos/seed/alfama/800/600".into(),
            caption: "Golden hour over the rooftops of Alfama".into(),
            location_name: Some("Lisbon, Portugal".into()),
            latitude: Some(38.7114),
            longitude: Some(-9.1300),
            tags: vec!["sunset".into(), "city".into(), "portugal".into()],
            likes: 128,
            transport_details: Some("Tram 28 from Martim Moniz".into()),
            food_details: Some("Pastéis de nata from a corner bakery".into()),
            created_at: at(2024, 4, 2, 19),
        },
        Photo {
            id: 2,
            user_id: 2,
            image_url: "https://picsum.photos/seed/fushimi/800/600".into(),
            caption: "Thousands of torii gates before the crowds arrive".into(),
            location_name: Some("Fushimi Inari, Kyoto".into()),
            latitude: Some(34.9671),
            longitude: Some(135.7727),
            tags: vec!["temple".into(), "japan".into(), "morning".into()],
            likes: 342,
            transport_details: Some("JR Nara line to Inari station".into()),
            food_details: None,
            created_at: at(2024, 3, 28, 6),
        },
        Photo {
            id: 3,
            user_id: 3,
            image_url: "https://picsum.photos/seed/fjord/800/600".into(),
            caption: "Fog lifting off the fjord".into(),
            location_name: Some("Geiranger, Norway".into()),
            latitude: Some(62.1008),
            longitude: Some(7.2059),
            tags: vec!["fjord".into(), "nature".into(), "norway".into()],
            likes: 87,
            transport_details: Some("Ferry from Hellesylt".into()),
            food_details: Some("Brown cheese waffles on deck".into()),
            created_at: at(2024, 5, 11, 8),
        },
        Photo {
            id: 4,
            user_id: 1,
            image_url: "https://picsum.photos/seed/sintra/800/600".into(),
            caption: "Pena Palace peeking through the clouds".into(),
            location_name: Some("Sintra, Portugal".into()),
            latitude: Some(38.7876),
            longitude: Some(-9.3906),
            tags: vec!["palace".into(), "portugal".into()],
            likes: 64,
            transport_details: None,
            food_details: Some("Travesseiros at Piriquita".into()),
            created_at: at(2024, 4, 5, 11),
        },
        Photo {
            id: 5,
            user_id: 2,
            image_url: "https://picsum.photos/seed/dotonbori/800/600".into(),
            caption: "Neon nights in Dotonbori".into(),
            location_name: Some("Osaka, Japan".into()),
            latitude: Some(34.6687),
            longitude: Some(135.5013),
            tags: vec!["city".into(), "night".into(), "japan".into()],
            likes: 211,
            transport_details: Some("Midosuji line to Namba".into()),
            food_details: Some("Takoyaki from a street stall".into()),
            created_at: at(2024, 5, 20, 21),
        },
    ]
}

pub fn places() -> Vec<Place> {
    vec![
        Place {
            id: 1,
            user_id: 1,
            name: "Miradouro da Senhora do Monte".into(),
            description: Some("Highest viewpoint in Lisbon, quiet at sunrise.".into()),
            category: "viewpoint".into(),
            latitude: 38.7191,
            longitude: -9.1327,
            created_at: at(2024, 4, 3, 7),
        },
        Place {
            id: 2,
            user_id: 2,
            name: "Nishiki Market".into(),
            description: Some("Narrow covered market with pickles and skewers.".into()),
            category: "market".into(),
            latitude: 35.0050,
            longitude: 135.7649,
            created_at: at(2024, 3, 29, 13),
        },
        Place {
            id: 3,
            user_id: 3,
            name: "Flydalsjuvet".into(),
            description: None,
            category: "viewpoint".into(),
            latitude: 62.0966,
            longitude: 7.2236,
            created_at: at(2024, 5, 11, 10),
        },
    ]
}

pub fn journeys() -> Vec<Journey> {
    vec![Journey {
        id: 1,
        user_id: 1,
        title: "Long weekend in Lisbon".into(),
        destination: "Lisbon, Portugal".into(),
        start_date: date(2024, 4, 2),
        end_date: date(2024, 4, 5),
        transport: Some("Flight to LIS, then trams and the Sintra train".into()),
        lodging: Some("Guesthouse in Graça".into()),
        days: vec![
            JourneyDay {
                day: 1,
                places: vec![
                    JourneyStop {
                        name: "Alfama".into(),
                        notes: Some("Get lost in the alleys".into()),
                    },
                    JourneyStop {
                        name: "Miradouro da Senhora do Monte".into(),
                        notes: None,
                    },
                ],
            },
            JourneyDay {
                day: 4,
                places: vec![JourneyStop {
                    name: "Pena Palace".into(),
                    notes: Some("Book the first slot".into()),
                }],
            },
        ],
        created_at: at(2024, 4, 6, 10),
    }]
}
