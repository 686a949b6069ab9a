// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 单次分析允许的最大字符数
pub const MAX_TEXT_CHARS: u64 = 20_000;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AnalyzeRequestDto {
    #[validate(
        length(max = MAX_TEXT_CHARS, message = "Text must be at most 20000 characters"),
        custom(function = "validate_not_blank")
    )]
    pub text: String,
}

/// 空文本和只含空白的文本都视为未输入
fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Please enter some text to analyze".into());
        return Err(error);
    }
    Ok(())
}
