//! Read-only projection of a published itinerary.
//!
//! The public viewer works from a share token alone: no session, no
//! authentication. What comes back may be missing pieces (no package, no
//! company details, days without events) and the projection keeps those as
//! explicit absences for the display layer to spell out, rather than
//! failing the whole view.

use crate::api::{SharePayload, TravelApi};
use crate::error::Result;
use crate::images;
use crate::models::{CompanyDetails, Itinerary, Package};

/// Everything the public page shows for one share token.
#[derive(Debug, Clone)]
pub struct SharedView {
    pub itinerary: Itinerary,
    /// The itinerary's canonical package: the first one the server listed
    pub package: Option<Package>,
    /// Publisher branding, when the account has any
    pub company: Option<CompanyDetails>,
}

impl SharedView {
    /// Shapes a share response into the viewer projection.
    pub fn from_payload(payload: SharePayload) -> Self {
        let SharePayload {
            itinerary,
            packages,
            user,
        } = payload;
        Self {
            itinerary,
            package: packages.into_iter().next(),
            company: user.and_then(|u| u.company_details),
        }
    }

    /// Rewrites every image reference into a URL fetchable from `origin`.
    ///
    /// Covers, event images, and the company logo all go through the same
    /// resolution: absolute URLs and data URIs pass through, everything
    /// else resolves against the server.
    pub fn resolve_images(&mut self, origin: &str) {
        if let Some(cover) = &self.itinerary.cover_image {
            self.itinerary.cover_image = Some(images::resolve_url(origin, cover));
        }
        for day in &mut self.itinerary.content.days {
            for event in &mut day.events {
                for reference in &mut event.images {
                    *reference = images::resolve_url(origin, reference);
                }
            }
        }
        if let Some(package) = &mut self.package {
            if let Some(cover) = &package.cover_image {
                package.cover_image = Some(images::resolve_url(origin, cover));
            }
        }
        if let Some(company) = &mut self.company {
            if let Some(logo) = &company.logo {
                company.logo = Some(images::resolve_url(origin, logo));
            }
        }
    }
}

/// Fetches the published itinerary behind a share token.
pub async fn fetch(api: &dyn TravelApi, share_uuid: &str) -> Result<SharedView> {
    let payload = api.shared_itinerary(share_uuid).await?;
    Ok(SharedView::from_payload(payload))
}
