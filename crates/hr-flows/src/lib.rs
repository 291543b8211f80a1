#![allow(missing_docs)]

pub mod attendance;
pub mod company;
pub mod offer;
pub mod staff;
pub mod vendor;

pub use attendance::{AttendanceCorrection, attendance_wizard};
pub use company::{Company, company_wizard};
pub use offer::{OfferTemplate, offer_template_wizard};
pub use staff::{ComplianceOfficer, HrManager, compliance_officer_wizard, hr_manager_wizard};
pub use vendor::{Vendor, vendor_wizard};
