use axum::extract::Multipart;

/// An uploaded statement with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Pull the `file` field out of a multipart upload.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedFile, String> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| format!("Failed to read file data: {}", e))?
                .to_vec();

            file = Some(UploadedFile { filename, data });
        } else {
            // Drain unknown fields
            field
                .bytes()
                .await
                .map_err(|e| format!("Failed to read form field {}: {}", name, e))?;
        }
    }

    file.ok_or_else(|| "No file uploaded".to_string())
}

/// Whether the client-supplied filename names a PDF.
pub fn is_pdf_filename(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}
