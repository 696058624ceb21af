//! Student Profile
//!
//! The single student the tutor addresses. The record is built once at startup,
//! wrapped in an `Arc` and handed out as a read-only snapshot.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Biographical details substituted into every prompt.
///
/// Every field is opaque text as far as the tutor is concerned. `age` is kept
/// numeric only so the JSON contract matches what clients already read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentProfile {
    // --- Identity ---
    #[schema(example = "Youssef")]
    pub name: String,
    pub age: u32,
    pub grade: String,

    // --- Origin ---
    pub home_country: String,
    pub home_city: String,
    pub current_country: String,
    pub current_city: String,
    pub time_in_country: String,

    // --- Personal ---
    pub main_hobby: String,
    pub sport: String,
    pub favorite_food: String,
    pub favorite_show: String,
    pub favorite_character: String,
    pub pet: String,
    pub best_friend: String,
    pub family_support: String,
    pub misses: String,
    pub best_of_new_country: String,

    // --- Academic ---
    pub favorite_subject: String,
    pub difficult_subject: String,
    pub difficulty_reason: String,

    // --- Emotional ---
    pub main_fear: String,
    pub motivation: String,
    pub anecdote: String,
    pub signature_phrase: String,
    pub dream: String,
}

impl StudentProfile {
    /// The compiled-in student record.
    pub fn builtin() -> Self {
        Self {
            name: "Youssef".to_string(),
            age: 11,
            grade: "6th grade of primary school".to_string(),
            home_country: "Morocco".to_string(),
            home_city: "Casablanca".to_string(),
            current_country: "Spain".to_string(),
            current_city: "Madrid".to_string(),
            time_in_country: "5 months".to_string(),
            main_hobby: "playing football and drawing cartoons".to_string(),
            sport: "he loves football, is a Real Madrid fan and admires Hakimi".to_string(),
            favorite_food: "his mom's chicken tagine and pizza".to_string(),
            favorite_show: "Captain Tsubasa".to_string(),
            favorite_character: "the striker who always solves problems with clever ideas"
                .to_string(),
            pet: "a cat called Simba who stayed behind with his uncle".to_string(),
            best_friend: "Pablo, they play football together at recess".to_string(),
            family_support: "his mom works in a cafe, his dad in a restaurant, and he has a 7-year-old little sister".to_string(),
            misses: "the markets in his neighborhood, playing in the street with his cousins and his mom's mint tea".to_string(),
            best_of_new_country: "the parks for playing football and the museums he visits with school".to_string(),
            favorite_subject: "Natural Sciences, he is fascinated by animals".to_string(),
            difficult_subject: "Mathematics, especially fractions".to_string(),
            difficulty_reason: "he sometimes gets confused when splitting things into equal parts"
                .to_string(),
            main_fear: "that people won't understand him when he mixes Spanish with Darija"
                .to_string(),
            motivation: "he wants to become a professional footballer and play in LaLiga one day"
                .to_string(),
            anecdote: "he once won a local tournament in Casablanca as the goalkeeper".to_string(),
            signature_phrase: "Bismillah".to_string(),
            dream: "to visit the Santiago Bernabeu stadium and watch a live match".to_string(),
        }
    }

    /// Every field as a `(placeholder, value)` pair, in declaration order.
    ///
    /// The placeholder names match the serialized field names, so a template
    /// refers to `{home_city}` exactly as the JSON profile does.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("age", self.age.to_string()),
            ("grade", self.grade.clone()),
            ("home_country", self.home_country.clone()),
            ("home_city", self.home_city.clone()),
            ("current_country", self.current_country.clone()),
            ("current_city", self.current_city.clone()),
            ("time_in_country", self.time_in_country.clone()),
            ("main_hobby", self.main_hobby.clone()),
            ("sport", self.sport.clone()),
            ("favorite_food", self.favorite_food.clone()),
            ("favorite_show", self.favorite_show.clone()),
            ("favorite_character", self.favorite_character.clone()),
            ("pet", self.pet.clone()),
            ("best_friend", self.best_friend.clone()),
            ("family_support", self.family_support.clone()),
            ("misses", self.misses.clone()),
            ("best_of_new_country", self.best_of_new_country.clone()),
            ("favorite_subject", self.favorite_subject.clone()),
            ("difficult_subject", self.difficult_subject.clone()),
            ("difficulty_reason", self.difficulty_reason.clone()),
            ("main_fear", self.main_fear.clone()),
            ("motivation", self.motivation.clone()),
            ("anecdote", self.anecdote.clone()),
            ("signature_phrase", self.signature_phrase.clone()),
            ("dream", self.dream.clone()),
        ]
    }
}

/// Holds the one profile and hands out the same snapshot on every call.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profile: Arc<StudentProfile>,
}

impl ProfileStore {
    pub fn new(profile: StudentProfile) -> Self {
        Self {
            profile: Arc::new(profile),
        }
    }

    pub fn get_profile(&self) -> Arc<StudentProfile> {
        Arc::clone(&self.profile)
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new(StudentProfile::builtin())
    }
}
