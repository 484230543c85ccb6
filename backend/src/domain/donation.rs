//! Resource donations offered to the relief effort.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::validation::{Constraint, FieldErrors, FieldRule, non_blank, validate};
use super::Email;

const DONATION_RULES: &[FieldRule] = &[
    FieldRule::new("DonorName", Constraint::Required, "Donor name is required."),
    FieldRule::new(
        "DonorName",
        Constraint::MaxLength(100),
        "Donor name must be at most 100 characters.",
    ),
    FieldRule::new("Email", Constraint::Required, "Email is required."),
    FieldRule::new("Email", Constraint::Email, "Email is not a valid email address."),
    FieldRule::new(
        "Email",
        Constraint::MaxLength(254),
        "Email must be at most 254 characters.",
    ),
    FieldRule::new("ResourceType", Constraint::Required, "Resource type is required."),
    FieldRule::new(
        "ResourceType",
        Constraint::MaxLength(100),
        "Resource type must be at most 100 characters.",
    ),
    FieldRule::new("Quantity", Constraint::Required, "Quantity is required."),
    FieldRule::new("Quantity", Constraint::Integer, "Quantity must be a whole number."),
    FieldRule::new("Quantity", Constraint::NonNegative, "Quantity cannot be negative."),
    FieldRule::new(
        "Description",
        Constraint::MaxLength(1000),
        "Description must be at most 1000 characters.",
    ),
    FieldRule::new("Contact", Constraint::MaxLength(100), "Contact must be at most 100 characters."),
    FieldRule::new(
        "PickupAddress",
        Constraint::MaxLength(300),
        "Pickup address must be at most 300 characters.",
    ),
];

/// Fulfilment state of a donation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DonationStatus {
    /// Recorded, not yet collected.
    #[default]
    Pending,
    /// Picked up from the donor.
    Collected,
    /// Handed out to recipients.
    Delivered,
}

/// Error returned when a donation status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown donation status: {0}")]
pub struct UnknownDonationStatus(pub String);

impl DonationStatus {
    /// Stored representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Collected => "Collected",
            Self::Delivered => "Delivered",
        }
    }
}

impl FromStr for DonationStatus {
    type Err = UnknownDonationStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Collected" => Ok(Self::Collected),
            "Delivered" => Ok(Self::Delivered),
            other => Err(UnknownDonationStatus(other.to_owned())),
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored donation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    /// Row identifier.
    pub id: i32,
    /// Name the donor gave.
    pub donor_name: String,
    /// Donor contact email.
    pub email: Email,
    /// Kind of resource, e.g. "Water".
    pub resource_type: String,
    /// Number of units; never negative.
    pub quantity: i32,
    /// Optional free-form notes.
    pub description: Option<String>,
    /// Optional phone or other contact.
    pub contact: Option<String>,
    /// Optional collection address.
    pub pickup_address: Option<String>,
    /// Fulfilment state.
    pub status: DonationStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a donation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonation {
    /// Name the donor gave.
    pub donor_name: String,
    /// Donor contact email.
    pub email: Email,
    /// Kind of resource.
    pub resource_type: String,
    /// Number of units.
    pub quantity: i32,
    /// Optional notes.
    pub description: Option<String>,
    /// Optional contact.
    pub contact: Option<String>,
    /// Optional collection address.
    pub pickup_address: Option<String>,
    /// Fulfilment state.
    pub status: DonationStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl NewDonation {
    /// Attach the identifier assigned by the store.
    pub fn into_donation(self, id: i32) -> Donation {
        Donation {
            id,
            donor_name: self.donor_name,
            email: self.email,
            resource_type: self.resource_type,
            quantity: self.quantity,
            description: self.description,
            contact: self.contact,
            pickup_address: self.pickup_address,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Raw donation submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogDonationRequest {
    /// Submitted `DonorName`.
    pub donor_name: String,
    /// Submitted `Email`.
    pub email: String,
    /// Submitted `ResourceType`.
    pub resource_type: String,
    /// Submitted `Quantity`, still as text.
    pub quantity: String,
    /// Submitted `Description`.
    pub description: String,
    /// Submitted `Contact`.
    pub contact: String,
    /// Submitted `PickupAddress`.
    pub pickup_address: String,
}

impl LogDonationRequest {
    /// Apply the donation rule table and build the row to insert.
    ///
    /// New donations always start as [`DonationStatus::Pending`].
    pub fn into_new_donation(self, created_at: DateTime<Utc>) -> Result<NewDonation, FieldErrors> {
        let mut errors = validate(DONATION_RULES, |field| match field {
            "DonorName" => Some(self.donor_name.as_str()),
            "Email" => Some(self.email.as_str()),
            "ResourceType" => Some(self.resource_type.as_str()),
            "Quantity" => Some(self.quantity.as_str()),
            "Description" => Some(self.description.as_str()),
            "Contact" => Some(self.contact.as_str()),
            "PickupAddress" => Some(self.pickup_address.as_str()),
            _ => None,
        });
        let email = Email::parse(&self.email).ok();
        let quantity = self.quantity.trim().parse::<i32>().ok();
        let (Some(email), Some(quantity)) = (email, quantity) else {
            if errors.is_empty() {
                errors.add("Quantity", "Quantity must be a whole number.");
            }
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewDonation {
            donor_name: self.donor_name.trim().to_owned(),
            email,
            resource_type: self.resource_type.trim().to_owned(),
            quantity,
            description: non_blank(&self.description).map(str::to_owned),
            contact: non_blank(&self.contact).map(str::to_owned),
            pickup_address: non_blank(&self.pickup_address).map(str::to_owned),
            status: DonationStatus::Pending,
            created_at,
        })
    }
}
