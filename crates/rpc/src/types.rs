use repdesk_types::{Company, CompanyId, Representative, RepresentativeId};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Representative view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativeDto {
    /// Representative id
    pub id: RepresentativeId,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
}

impl From<Representative> for RepresentativeDto {
    fn from(representative: Representative) -> Self {
        Self {
            id: representative.id,
            first_name: representative.first_name,
            last_name: representative.last_name,
        }
    }
}

/// Company view with its representative set resolved to full records
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    /// Company id
    pub id: CompanyId,
    /// Company name
    pub name: String,
    /// Resolved representative records
    pub representatives: Vec<RepresentativeDto>,
}

impl CompanyDto {
    /// Build the view from a company record and its resolved members
    pub fn from_parts(company: Company, members: Vec<Representative>) -> Self {
        Self {
            id: company.id,
            name: company.name,
            representatives: members.into_iter().map(Into::into).collect(),
        }
    }
}

/// Company create/update body
///
/// An omitted `representatives` field leaves the existing set untouched on
/// update; a supplied list replaces it. Embedded entries are references: only
/// the `id` is used, each one resolved to the stored record.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPayload {
    #[validate(
        custom(function = not_blank, message = "Name must not be blank"),
        length(max = 255, message = "Name must not exceed 255 characters")
    )]
    pub name: String,

    #[serde(default)]
    pub representatives: Option<Vec<RepresentativeDto>>,
}

impl CompanyPayload {
    /// Identifiers of the referenced representatives, if a list was supplied
    pub fn representative_ids(&self) -> Option<Vec<RepresentativeId>> {
        self.representatives
            .as_ref()
            .map(|members| members.iter().map(|m| m.id).collect())
    }
}

/// Representative create/update body
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativePayload {
    #[validate(
        custom(function = not_blank, message = "First name must not be blank"),
        length(max = 255, message = "First name must not exceed 255 characters")
    )]
    pub first_name: String,

    #[validate(
        custom(function = not_blank, message = "Last name must not be blank"),
        length(max = 255, message = "Last name must not exceed 255 characters")
    )]
    pub last_name: String,
}

/// Transfer query parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferParams {
    /// Company the representative is transferred out of
    pub current_company_id: CompanyId,
    /// Company the representative is transferred into
    pub new_company_id: CompanyId,
    /// Representative to transfer
    pub representative_id: RepresentativeId,
}

/// Full-name lookup query parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullNameParams {
    pub first_name: String,
    pub last_name: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}
