// server/src/repository/seed.rs

//! Sample catalog used by the in-memory repository and by `SEED_DB=true`.

use archiplan_core::{Project, ProjectCategory};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

struct SampleProject {
  name: &'static str,
  description: &'static str,
  category: ProjectCategory,
  price: i64,
  image: &'static str,
  features: [&'static str; 6],
  area: f64,
  rooms: i32,
  bathrooms: i32,
  floors: i32,
  style: &'static str,
}

const SAMPLES: [SampleProject; 6] = [
  SampleProject {
    name: "Casa Moderna Minimalista",
    description: "Contemporary design with clean lines and open spaces, for families who want generous social areas and a connection with nature.",
    category: ProjectCategory::Residential,
    price: 2500,
    image: "/placeholder-house-1.jpg",
    features: [
      "Open-concept layout",
      "Large panoramic windows",
      "Terrace with pergola",
      "Kitchen with island",
      "Built-in closets",
      "Parking for 2 vehicles",
    ],
    area: 180.0,
    rooms: 3,
    bathrooms: 2,
    floors: 2,
    style: "Minimalist",
  },
  SampleProject {
    name: "Apartamento Urbano Loft",
    description: "Loft space for urban professionals. Industrial design with contemporary finishes and full use of vertical space.",
    category: ProjectCategory::Residential,
    price: 1800,
    image: "/placeholder-loft-1.jpg",
    features: [
      "4 meter ceilings",
      "Mezzanine studio",
      "Open kitchen",
      "Main bathroom with walk-in closet",
      "Recessed LED lighting",
      "Balcony with planter",
    ],
    area: 95.0,
    rooms: 2,
    bathrooms: 1,
    floors: 2,
    style: "Industrial",
  },
  SampleProject {
    name: "Villa Campestre",
    description: "Country residence with renovated traditional architecture, away from the city without giving up modern comforts.",
    category: ProjectCategory::Residential,
    price: 4500,
    image: "/placeholder-villa-1.jpg",
    features: [
      "Large garden with fruit trees",
      "Pool with wooden deck",
      "Barbecue area",
      "Master suite with jacuzzi",
      "Separate service room",
      "Garage for 3 vehicles",
    ],
    area: 320.0,
    rooms: 5,
    bathrooms: 4,
    floors: 1,
    style: "Modern Rustic",
  },
  SampleProject {
    name: "Oficina Corporativa",
    description: "Modern workspace focused on productivity and team wellbeing, with collaborative areas and private rooms.",
    category: ProjectCategory::Commercial,
    price: 3200,
    image: "/placeholder-office-1.jpg",
    features: [
      "Open space for 20 people",
      "Meeting room with AV equipment",
      "Break area with kitchen",
      "Private phone booths",
      "Reception with waiting area",
      "Accessible restrooms",
    ],
    area: 250.0,
    rooms: 8,
    bathrooms: 3,
    floors: 1,
    style: "Corporate Modern",
  },
  SampleProject {
    name: "Café Boutique",
    description: "Retail unit for a café or small restaurant. Cozy atmosphere with a layout built for efficient service.",
    category: ProjectCategory::Commercial,
    price: 1500,
    image: "/placeholder-cafe-1.jpg",
    features: [
      "Service counter with display",
      "Compact industrial kitchen",
      "Terrace with outdoor furniture",
      "Warm ambient lighting",
      "Seating for 30 guests",
      "Storage with separate access",
    ],
    area: 85.0,
    rooms: 3,
    bathrooms: 2,
    floors: 1,
    style: "Bohemian Industrial",
  },
  SampleProject {
    name: "Casa Eco-Sustentable",
    description: "Home designed on sustainable architecture principles, with renewable energy systems and ecological materials.",
    category: ProjectCategory::Residential,
    price: 3800,
    image: "/placeholder-eco-1.jpg",
    features: [
      "Rooftop solar panels",
      "Rainwater harvesting",
      "Vertical garden facade",
      "Natural thermal insulation",
      "Passive cross ventilation",
      "Urban garden on the terrace",
    ],
    area: 200.0,
    rooms: 4,
    bathrooms: 3,
    floors: 2,
    style: "Eco Modern",
  },
];

/// Six active USD projects with ids `p1`..`p6`. `p1` is the newest.
pub fn sample_projects() -> Vec<Project> {
  let now = Utc::now();
  SAMPLES
    .iter()
    .enumerate()
    .map(|(i, s)| {
      let created_at = now - Duration::minutes(i as i64);
      Project {
        id: format!("p{}", i + 1),
        name: s.name.to_string(),
        description: s.description.to_string(),
        category: s.category,
        price: Decimal::from(s.price),
        currency: "USD".to_string(),
        images: vec![s.image.to_string()],
        features: s.features.iter().map(|f| f.to_string()).collect(),
        area: s.area,
        rooms: s.rooms,
        bathrooms: s.bathrooms,
        floors: s.floors,
        style: s.style.to_string(),
        is_active: true,
        created_at,
        updated_at: created_at,
      }
    })
    .collect()
}
