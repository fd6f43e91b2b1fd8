use serde::{Deserialize, Serialize};

const QR_SERVER_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Student scores to encode on an index card
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexCardRequest {
    pub student_id: String,
    pub surname: String,
    pub firstname: String,
    pub quiz_scores: Vec<String>,
    pub recitation_scores: Vec<String>,
    pub project_scores: Vec<String>,
    pub attendance: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexCardQr {
    pub data: String,
    pub qr_code_url: String,
}

impl IndexCardRequest {
    pub fn is_valid(&self) -> bool {
        [&self.student_id, &self.surname, &self.firstname]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// Compact `ID:..;S:..;F:..;Q:..;R:..;P:..;A:..` payload
    pub fn data_string(&self) -> String {
        fn or_na(value: String) -> String {
            if value.is_empty() { "N/A".to_string() } else { value }
        }
        fn scores(values: &[String]) -> String {
            values
                .iter()
                .map(|s| if s.is_empty() { "0" } else { s.as_str() })
                .collect::<Vec<_>>()
                .join(",")
        }

        let attendance = self
            .attendance
            .iter()
            .map(|present| if *present { "1" } else { "0" })
            .collect::<Vec<_>>()
            .join(",");

        [
            format!("ID:{}", or_na(self.student_id.clone())),
            format!("S:{}", or_na(self.surname.to_uppercase())),
            format!("F:{}", or_na(self.firstname.to_uppercase())),
            format!("Q:{}", scores(&self.quiz_scores)),
            format!("R:{}", scores(&self.recitation_scores)),
            format!("P:{}", scores(&self.project_scores)),
            format!("A:{}", attendance),
        ]
        .join(";")
    }

    pub fn to_qr(&self) -> IndexCardQr {
        let data = self.data_string();
        let qr_code_url = format!(
            "{}?data={}&size=200x200&ecc=M",
            QR_SERVER_URL,
            urlencoding::encode(&data)
        );
        IndexCardQr { data, qr_code_url }
    }
}
