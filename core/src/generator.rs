//! Randomized, shape-valid entities for create and update scenarios.
//!
//! The generator owns its RNG; two generators built from the same seed
//! produce the same entities in the same order.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::{Address, Album, Comment, Company, Geo, Photo, Post, Todo, User};

/// Users in the fixture service.
pub const USER_IDS: std::ops::RangeInclusive<u64> = 1..=10;
/// Post and album ids used for foreign keys.
pub const PARENT_IDS: std::ops::RangeInclusive<u64> = 1..=99;

#[derive(Debug, Clone)]
pub struct TestDataGenerator {
    rng: ChaCha8Rng,
}

impl TestDataGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system; use `seeded` when a failure must be
    /// reproducible.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    fn token(&mut self) -> u32 {
        self.rng.random_range(1000..=9999)
    }

    pub fn post(&mut self) -> Post {
        Post {
            id: 0,
            user_id: self.rng.random_range(USER_IDS),
            title: format!("Test Post Title {}", self.token()),
            body: format!("Test post body content {}", self.token()),
        }
    }

    pub fn comment(&mut self) -> Comment {
        Comment {
            id: 0,
            post_id: self.rng.random_range(PARENT_IDS),
            name: format!("Test Comment {}", self.token()),
            email: format!("test{}@example.com", self.token()),
            body: format!("Test comment body {}", self.token()),
        }
    }

    pub fn album(&mut self) -> Album {
        Album {
            id: 0,
            user_id: self.rng.random_range(USER_IDS),
            title: format!("Test Album {}", self.token()),
        }
    }

    pub fn photo(&mut self) -> Photo {
        Photo {
            id: 0,
            album_id: self.rng.random_range(PARENT_IDS),
            title: format!("Test Photo {}", self.token()),
            url: format!(
                "https://via.placeholder.com/600/{}",
                self.rng.random_range(100..=999)
            ),
            thumbnail_url: format!(
                "https://via.placeholder.com/150/{}",
                self.rng.random_range(100..=999)
            ),
        }
    }

    pub fn todo(&mut self) -> Todo {
        Todo {
            id: 0,
            user_id: self.rng.random_range(USER_IDS),
            title: format!("Test Todo {}", self.token()),
            completed: self.rng.random_bool(0.5),
        }
    }

    pub fn user(&mut self) -> User {
        User {
            id: 0,
            name: format!("Test User {}", self.token()),
            username: format!("testuser{}", self.token()),
            email: format!("user{}@example.com", self.token()),
            address: Address {
                street: format!("{} Test St", self.rng.random_range(1..=999)),
                suite: format!("Apt. {}", self.rng.random_range(1..=99)),
                city: "TestCity".to_string(),
                zipcode: self.rng.random_range(10000..=99999).to_string(),
                geo: Geo {
                    lat: self.rng.random_range(-90..=90).to_string(),
                    lng: self.rng.random_range(-180..=180).to_string(),
                },
            },
            phone: format!(
                "{}-{}-{}",
                self.rng.random_range(100..=999),
                self.rng.random_range(100..=999),
                self.token()
            ),
            website: "example.com".to_string(),
            company: Company {
                name: format!("Test Company {}", self.rng.random_range(100..=999)),
                catch_phrase: "Testing Excellence".to_string(),
                bs: "quality assurance".to_string(),
            },
        }
    }
}
