use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadataDto {
    pub aoi_name: String,      // required by the server
    pub analysis_type: String, // required by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satellite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<[f64; 2]>, // lon, lat
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
}

impl UploadMetadataDto {
    pub fn new(aoi_name: impl ToString, analysis_type: impl ToString) -> Self {
        Self {
            aoi_name: aoi_name.to_string(),
            analysis_type: analysis_type.to_string(),
            description: None,
            acquisition_date: None,
            satellite: None,
            coordinates: None,
            submitted_by: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UploadMetadataDto;

    #[test]
    pub fn test_serde_json() {
        let dto = UploadMetadataDto::new("Sundarbans Delta", "vegetation");
        let dto_str = r#"{"aoiName":"Sundarbans Delta","analysisType":"vegetation"}"#;
        assert_eq!(dto_str, serde_json::to_string(&dto).unwrap());

        let mut dto = UploadMetadataDto::new("Mumbai North", "urban");
        dto.satellite = Some("liss4".to_owned());
        dto.coordinates = Some([72.87, 19.07]);
        let dto_str = r#"{"aoiName":"Mumbai North","analysisType":"urban","satellite":"liss4","coordinates":[72.87,19.07]}"#;
        assert_eq!(dto_str, serde_json::to_string(&dto).unwrap());
    }

    #[test]
    fn ignores_unknown_fields() {
        let dto: UploadMetadataDto = serde_json::from_str(
            r#"{"aoiName":"A","analysisType":"water","sensorBand":"NIR"}"#,
        )
        .unwrap();
        assert_eq!("A", dto.aoi_name);
        assert_eq!("water", dto.analysis_type);
    }
}
