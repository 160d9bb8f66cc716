use serde::{Deserialize, Serialize};

use crate::auth::validate::{
    validate_email, validate_items, validate_non_empty, validate_optional, validate_required,
};
use super::exhibitor::{MAX_ITEM_LEN, MAX_ITEMS, MAX_TEXT_LEN, SocialLinks};
use super::{FieldError, ValidationErrors, WizardForm, parse_flag};

/// Society onboarding: society, contact, location and facilities, settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocietyForm {
    // Society
    pub society_name: String,
    pub society_type: String,
    pub registration_number: String,
    pub established_year: String,
    pub description: String,
    // Contact
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub social_links: SocialLinks,
    // Location and facilities
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub amenities: Vec<String>,
    pub facilities: Vec<String>,
    // Settings
    pub status: String,
    pub total_members: String,
    pub is_verified: bool,
    pub notes: String,
}

impl Default for SocietyForm {
    fn default() -> Self {
        Self {
            society_name: String::new(),
            society_type: String::new(),
            registration_number: String::new(),
            established_year: String::new(),
            description: String::new(),
            contact_person: String::new(),
            email: String::new(),
            phone: String::new(),
            social_links: SocialLinks::default(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            amenities: Vec::new(),
            facilities: Vec::new(),
            status: "active".to_string(),
            total_members: String::new(),
            is_verified: false,
            notes: String::new(),
        }
    }
}

impl WizardForm for SocietyForm {
    const STEPS: u8 = 4;
    const SUBMIT_ERROR: &'static str = "Failed to create society. Please try again.";

    fn step_title(step: u8) -> &'static str {
        match step {
            1 => "Society",
            2 => "Contact",
            3 => "Location & Facilities",
            4 => "Settings",
            _ => "",
        }
    }

    fn validate_step(&self, step: u8) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        match step {
            1 => {
                errors.check("society_name", validate_required(&self.society_name, "Society name", 200));
                errors.check("society_type", validate_required(&self.society_type, "Society type", 100));
                errors.check(
                    "registration_number",
                    validate_optional(&self.registration_number, "Registration number", 100),
                );
                errors.check("established_year", validate_optional(&self.established_year, "Established", 10));
                errors.check("description", validate_optional(&self.description, "Description", MAX_TEXT_LEN));
            }
            2 => {
                errors.check("contact_person", validate_required(&self.contact_person, "Contact person", 200));
                errors.check("email", validate_email(&self.email));
                errors.check("phone", validate_required(&self.phone, "Phone", 50));
                self.social_links.validate(&mut errors);
            }
            3 => {
                errors.check("address", validate_required(&self.address, "Address", 300));
                errors.check("city", validate_required(&self.city, "City", 100));
                errors.check("state", validate_optional(&self.state, "State", 100));
                errors.check("postal_code", validate_optional(&self.postal_code, "Postal code", 20));
                errors.check(
                    "amenities",
                    validate_non_empty(&self.amenities, "At least one amenity is required"),
                );
                if !errors.contains("amenities") {
                    errors.check("amenities", validate_items(&self.amenities, "Amenities", MAX_ITEMS, MAX_ITEM_LEN));
                }
                errors.check("facilities", validate_items(&self.facilities, "Facilities", MAX_ITEMS, MAX_ITEM_LEN));
            }
            4 => {
                errors.check("status", validate_required(&self.status, "Status", 50));
                errors.check("total_members", validate_optional(&self.total_members, "Total members", 10));
                errors.check("notes", validate_optional(&self.notes, "Notes", MAX_TEXT_LEN));
            }
            _ => {}
        }
        errors
    }

    fn set_field(&mut self, path: &str, value: &str) -> Result<(), FieldError> {
        if let Some((group, key)) = path.split_once('.') {
            return match group {
                "social_links" if self.social_links.set(key, value) => Ok(()),
                _ => Err(FieldError::Unknown(path.to_string())),
            };
        }

        let slot = match path {
            "is_verified" => {
                self.is_verified = parse_flag(value);
                return Ok(());
            }
            "society_name" => &mut self.society_name,
            "society_type" => &mut self.society_type,
            "registration_number" => &mut self.registration_number,
            "established_year" => &mut self.established_year,
            "description" => &mut self.description,
            "contact_person" => &mut self.contact_person,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "postal_code" => &mut self.postal_code,
            "status" => &mut self.status,
            "total_members" => &mut self.total_members,
            "notes" => &mut self.notes,
            _ => return Err(FieldError::Unknown(path.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn list_mut(&mut self, field: &str) -> Result<&mut Vec<String>, FieldError> {
        match field {
            "amenities" => Ok(&mut self.amenities),
            "facilities" => Ok(&mut self.facilities),
            _ => Err(FieldError::NotAList(field.to_string())),
        }
    }
}
