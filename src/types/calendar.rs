// src/types/calendar.rs
//! Calendar entities used by the time-management feature

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evenement {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub titre: String,
    /// ISO date, `YYYY-MM-DD`
    pub date: String,
    pub heure_debut: Option<String>,
    pub heure_fin: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub lieu: Option<String>,
    pub couleur: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvenementRequest {
    pub titre: String,
    pub date: String,
    pub heure_debut: String,
    pub heure_fin: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lieu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub couleur: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disponibilite {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub jour: String,
    pub heure_debut: String,
    pub heure_fin: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisponibiliteRequest {
    pub jour: String,
    pub heure_debut: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heure_fin: Option<String>,
}
