//! Admin declarations for the Projects domain

use crate::error::AdminError;
use crate::models::{BUILDING, PLAYGROUND, PROJECT};
use crate::options::{ModelAdmin, ModelAdminBuilder};
use crate::site::AdminSite;

pub fn project_admin() -> Result<ModelAdmin, AdminError> {
    ModelAdminBuilder::new(&PROJECT)
        .list_display(["id", "name"])
        .search_fields(["name", "user__username"])
        .list_filter(["user"])
        .build()
}

pub fn playground_admin() -> Result<ModelAdmin, AdminError> {
    ModelAdminBuilder::new(&PLAYGROUND)
        .list_display(["id", "project", "coordinates"])
        .search_fields(["project__name"])
        .build()
}

pub fn building_admin() -> Result<ModelAdmin, AdminError> {
    ModelAdminBuilder::new(&BUILDING)
        .list_display(["id", "project", "floors", "floors_height", "coordinates"])
        .search_fields(["project__name"])
        .list_filter(["floors"])
        .build()
}

/// Site with every record type of the Projects domain registered
pub fn default_site() -> Result<AdminSite, AdminError> {
    let mut site = AdminSite::new();
    site.register(project_admin()?)?;
    site.register(playground_admin()?)?;
    site.register(building_admin()?)?;
    Ok(site)
}
