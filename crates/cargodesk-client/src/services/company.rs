//! Company CRUD over multipart endpoints.
//!
//! Companies are the one entity whose create/update travels as a multipart
//! form: scalar fields as text parts, `bankDetails` JSON-stringified into a
//! single text part, and logo/signature as optional file parts.

use reqwest::multipart::{Form, Part};
use tracing::debug;

use cargodesk_core::{
    parse_list, parse_mutation, parse_one, Company, CompanyDraft, ListPage, Mutation,
};

use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::normalize::normalize;
use crate::services::{encode, ListQuery};

const CONTEXT: &str = "company";
const PATH: &str = "companies";

/// An uploaded file attached to a company (logo or signature).
#[derive(Debug, Clone)]
pub struct FilePart {
    pub filename: String,
    /// MIME type, e.g. "image/png".
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Builds a multipart part. An unparseable content type falls back to
    /// the part's default (octet-stream) rather than failing the upload.
    fn to_part(&self) -> Part {
        let part = Part::bytes(self.bytes.clone()).file_name(self.filename.clone());
        match part.mime_str(&self.content_type) {
            Ok(part) => part,
            Err(_) => Part::bytes(self.bytes.clone()).file_name(self.filename.clone()),
        }
    }
}

/// Service for the company setup screen.
#[derive(Debug, Clone)]
pub struct CompanyService {
    client: ApiClient,
}

impl CompanyService {
    pub fn new(client: ApiClient) -> Self {
        CompanyService { client }
    }

    pub async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<Company>> {
        let payload = self
            .client
            .get_json(PATH, &query.to_query())
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_list(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }

    pub async fn get(&self, id: i64) -> ApiResult<Company> {
        let payload = self
            .client
            .get_json(&format!("{}/{}", PATH, id), &[])
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_one(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }

    pub async fn create(
        &self,
        draft: &CompanyDraft,
        logo: Option<FilePart>,
        signature: Option<FilePart>,
    ) -> ApiResult<Mutation<Company>> {
        let make_form = build_form(draft, &logo, &signature)?;
        let payload = self
            .client
            .post_form(PATH, make_form)
            .await
            .map_err(|f| normalize(f, CONTEXT, "create"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "create", e))
    }

    pub async fn update(
        &self,
        id: i64,
        draft: &CompanyDraft,
        logo: Option<FilePart>,
        signature: Option<FilePart>,
    ) -> ApiResult<Mutation<Company>> {
        let make_form = build_form(draft, &logo, &signature)?;
        let payload = self
            .client
            .put_form(&format!("{}/{}", PATH, id), make_form)
            .await
            .map_err(|f| normalize(f, CONTEXT, "update"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "update", e))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Mutation<Company>> {
        let payload = self
            .client
            .delete_json(&format!("{}/{}", PATH, id))
            .await
            .map_err(|f| normalize(f, CONTEXT, "delete"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "delete", e))
    }
}

/// Builds a reusable form factory for create/update.
///
/// A factory rather than a form, so the HTTP layer can rebuild the body when
/// replaying after a token refresh.
fn build_form<'a>(
    draft: &'a CompanyDraft,
    logo: &'a Option<FilePart>,
    signature: &'a Option<FilePart>,
) -> ApiResult<impl Fn() -> Form + 'a> {
    // Bank details travel as one JSON-stringified text field on the wire.
    let bank_details = encode(&draft.bank_details)?.to_string();

    debug!(
        name = %draft.name,
        has_logo = logo.is_some(),
        has_signature = signature.is_some(),
        "building company form"
    );

    Ok(move || {
        let mut form = Form::new()
            .text("name", draft.name.clone())
            .text("email", draft.email.clone())
            .text("bankDetails", bank_details.clone());

        if let Some(phone) = &draft.phone {
            form = form.text("phone", phone.clone());
        }
        if let Some(address) = &draft.address {
            form = form.text("address", address.clone());
        }
        if let Some(gst) = &draft.gst_number {
            form = form.text("gstNumber", gst.clone());
        }
        if let Some(iec) = &draft.iec_number {
            form = form.text("iecNumber", iec.clone());
        }
        if let Some(logo) = logo {
            form = form.part("logo", logo.to_part());
        }
        if let Some(signature) = signature {
            form = form.part("signature", signature.to_part());
        }

        form
    })
}
