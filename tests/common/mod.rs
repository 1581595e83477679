#![allow(dead_code)]

use carrent::model::{Agency, ApiResponse, Car, CarResult, Filters, PriceRange, Provider};
use serde_json::{json, Value};

pub fn car_result(id: u64, name: &str, price: f64) -> CarResult {
    CarResult {
        car: Car {
            id,
            name: name.to_string(),
            car_type: "SUV".to_string(),
            category: "Standard".to_string(),
            fuel: "Petrol".to_string(),
            transmission: "Automatic".to_string(),
            image: Some(format!("https://img.example.com/{id}.jpg")),
            passengers: 5,
            bags: 3,
            sipp: None,
        },
        agency: Agency {
            name: "Hertz".to_string(),
            code: Some("ZE".to_string()),
            logo: Some("https://img.example.com/hertz.png".to_string()),
            rating: 8.4,
        },
        provider: Provider {
            name: "RentalCars".to_string(),
            logo: Some("https://img.example.com/rc.png".to_string()),
        },
        price,
        pickup_location: "3900 South Las Vegas Boulevard, Luxor Hotel, Las Vegas, NV".to_string(),
        fuel_policy: Some("Full to Full".to_string()),
        free_cancellation: true,
        unlimited_mileage: false,
        latitude: None,
        longitude: None,
    }
}

pub fn response(page: u32, total_pages: u32, results: Vec<CarResult>) -> ApiResponse {
    ApiResponse {
        page,
        limit: 12,
        count: results.len() as u64,
        total_pages,
        results,
    }
}

pub fn vocabulary() -> Filters {
    Filters {
        car_types: vec!["SUV".into(), "Sedan".into(), "Convertible".into()],
        fuel_types: vec!["Petrol".into(), "Diesel".into(), "Electric".into()],
        categories: vec!["Economy".into(), "Standard".into()],
        agencies: vec![Agency {
            name: "Hertz".into(),
            code: None,
            logo: Some("https://img.example.com/hertz.png".into()),
            rating: 8.4,
        }],
        price_range: PriceRange {
            min: 900.0,
            max: 25000.0,
        },
    }
}

pub fn cars_json() -> Value {
    json!({
        "page": 1,
        "limit": 12,
        "count": 1,
        "total_pages": 1,
        "results": [{
            "car": {
                "id": 7,
                "name": "Jeep Wrangler",
                "type": "SUV",
                "category": "Standard",
                "fuel": "Petrol",
                "transmission": "Automatic",
                "image": "https://img.example.com/7.jpg",
                "passengers": 5,
                "bags": 3
            },
            "agency": {"name": "Hertz", "logo": "https://img.example.com/hertz.png", "rating": 8.4},
            "provider": {"name": "RentalCars", "logo": "https://img.example.com/rc.png"},
            "price": 1500.0,
            "pickup_location": "3900 South Las Vegas Boulevard, Luxor Hotel, Las Vegas, NV",
            "fuel_policy": "Full to Full",
            "free_cancellation": true,
            "unlimited_mileage": true
        }]
    })
}

pub fn filters_json() -> Value {
    json!({
        "car_types": ["SUV", "Sedan"],
        "fuel_types": ["Petrol", "Electric"],
        "categories": ["Standard"],
        "agencies": [{"name": "Hertz", "code": "ZE", "logo": "https://img.example.com/hertz.png", "rating": 8.4}],
        "price_range": {"min": 900, "max": 25000}
    })
}

/// A `/cars/` page shaped like the backend's raw rows: nullable columns left
/// null and the extra location columns present.
pub fn backend_cars_json() -> Value {
    json!({
        "page": 1,
        "limit": 12,
        "count": 2,
        "total_pages": 1,
        "results": [
            {
                "car": {
                    "id": 11,
                    "name": "Chevrolet Spark",
                    "type": "Hatchback",
                    "category": "Economy",
                    "fuel": "Petrol",
                    "transmission": "Manual",
                    "image": null,
                    "passengers": 4,
                    "bags": 1,
                    "sipp": "MBMR"
                },
                "agency": {"name": "Budget", "code": null, "logo": null, "rating": 7.1},
                "provider": {"name": "RentalCars", "logo": null},
                "price": 900.0,
                "pickup_location": "7135 Gilespie St, Las Vegas, NV 89119",
                "fuel_policy": null,
                "free_cancellation": false,
                "unlimited_mileage": false,
                "latitude": 36.060839,
                "longitude": -115.16357
            },
            {
                "car": {
                    "id": 12,
                    "name": "Tesla Model 3",
                    "type": "Sedan",
                    "category": "Premium",
                    "fuel": "Electric",
                    "transmission": "Automatic",
                    "image": "https://img.example.com/12.jpg",
                    "passengers": 5,
                    "bags": 2,
                    "sipp": null
                },
                "agency": {"name": "Hertz", "code": "ZE", "logo": "https://img.example.com/hertz.png", "rating": 8.4},
                "provider": {"name": "RentalCars", "logo": "https://img.example.com/rc.png"},
                "price": 2000.0,
                "pickup_location": "7135 Gilespie St, Las Vegas, NV 89119",
                "fuel_policy": "Full to Full",
                "free_cancellation": true,
                "unlimited_mileage": true,
                "latitude": null,
                "longitude": null
            }
        ]
    })
}
