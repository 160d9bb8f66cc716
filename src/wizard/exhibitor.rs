use serde::{Deserialize, Serialize};

use crate::auth::validate::{
    validate_email, validate_items, validate_non_empty, validate_optional, validate_required,
};
use super::{FieldError, ValidationErrors, WizardForm, parse_flag};

pub(crate) const MAX_TEXT_LEN: usize = 500;
pub(crate) const MAX_LINK_LEN: usize = 200;
pub(crate) const MAX_ITEMS: usize = 20;
pub(crate) const MAX_ITEM_LEN: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub website: String,
    pub facebook: String,
    pub instagram: String,
    pub linkedin: String,
    pub twitter: String,
}

impl SocialLinks {
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "website" => &mut self.website,
            "facebook" => &mut self.facebook,
            "instagram" => &mut self.instagram,
            "linkedin" => &mut self.linkedin,
            "twitter" => &mut self.twitter,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    /// Length errors keyed by the link's field path.
    pub fn validate(&self, errors: &mut ValidationErrors) {
        for (key, label, value) in [
            ("social_links.website", "Website", &self.website),
            ("social_links.facebook", "Facebook", &self.facebook),
            ("social_links.instagram", "Instagram", &self.instagram),
            ("social_links.linkedin", "LinkedIn", &self.linkedin),
            ("social_links.twitter", "Twitter", &self.twitter),
        ] {
            errors.check(key, validate_optional(value, label, MAX_LINK_LEN));
        }
    }
}

/// Exhibitor onboarding: company, contact, location, exhibition, settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhibitorForm {
    // Company
    pub company_name: String,
    pub category: String,
    pub description: String,
    // Contact
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    // Location
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    // Exhibition
    pub booth_size: String,
    pub booth_number: String,
    pub products: Vec<String>,
    pub services: Vec<String>,
    pub social_links: SocialLinks,
    // Settings
    pub status: String,
    pub is_featured: bool,
    pub receive_notifications: bool,
    pub notes: String,
}

impl Default for ExhibitorForm {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            category: String::new(),
            description: String::new(),
            contact_person: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: String::new(),
            booth_size: String::new(),
            booth_number: String::new(),
            products: Vec::new(),
            services: Vec::new(),
            social_links: SocialLinks::default(),
            status: "pending".to_string(),
            is_featured: false,
            receive_notifications: true,
            notes: String::new(),
        }
    }
}

impl WizardForm for ExhibitorForm {
    const STEPS: u8 = 5;
    const SUBMIT_ERROR: &'static str = "Failed to create exhibitor. Please try again.";

    fn step_title(step: u8) -> &'static str {
        match step {
            1 => "Company",
            2 => "Contact",
            3 => "Location",
            4 => "Exhibition",
            5 => "Settings",
            _ => "",
        }
    }

    fn validate_step(&self, step: u8) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        match step {
            1 => {
                errors.check("company_name", validate_required(&self.company_name, "Company name", 200));
                errors.check("category", validate_required(&self.category, "Category", 100));
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
                errors.check("country", validate_required(&self.country, "Country", 100));
            }
            4 => {
                errors.check("booth_size", validate_required(&self.booth_size, "Booth size", 50));
                errors.check("booth_number", validate_optional(&self.booth_number, "Booth number", 50));
                let offerings: Vec<String> = self.products.iter().chain(&self.services).cloned().collect();
                errors.check(
                    "products",
                    validate_non_empty(&offerings, "At least one product or service is required"),
                );
                if !errors.contains("products") {
                    errors.check("products", validate_items(&self.products, "Products", MAX_ITEMS, MAX_ITEM_LEN));
                }
                errors.check("services", validate_items(&self.services, "Services", MAX_ITEMS, MAX_ITEM_LEN));
            }
            5 => {
                errors.check("status", validate_required(&self.status, "Status", 50));
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
            "is_featured" => {
                self.is_featured = parse_flag(value);
                return Ok(());
            }
            "receive_notifications" => {
                self.receive_notifications = parse_flag(value);
                return Ok(());
            }
            "products" | "services" => return Err(FieldError::Unknown(path.to_string())),
            "company_name" => &mut self.company_name,
            "category" => &mut self.category,
            "description" => &mut self.description,
            "contact_person" => &mut self.contact_person,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "postal_code" => &mut self.postal_code,
            "country" => &mut self.country,
            "booth_size" => &mut self.booth_size,
            "booth_number" => &mut self.booth_number,
            "status" => &mut self.status,
            "notes" => &mut self.notes,
            _ => return Err(FieldError::Unknown(path.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn list_error_key(field: &str) -> &str {
        match field {
            "services" => "products",
            other => other,
        }
    }

    fn list_mut(&mut self, field: &str) -> Result<&mut Vec<String>, FieldError> {
        match field {
            "products" => Ok(&mut self.products),
            "services" => Ok(&mut self.services),
            _ => Err(FieldError::NotAList(field.to_string())),
        }
    }
}
