/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Character-set and case rules for broker entity names.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use unicode_general_category::{get_general_category, GeneralCategory};

const MODERN_ADDITIONAL_CHARACTERS: &[char] = &['.', '-', '_'];
const LEGACY_ADDITIONAL_CHARACTERS: &[char] = &['_'];

/// Entity naming convention.
///
/// `Modern` allows periods and hyphens and preserves case. `Legacy` is the older,
/// more conservative scheme kept so that entities provisioned under it can still be
/// addressed: only underscores besides letters and digits, lowercase throughout.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    #[default]
    Modern,
    Legacy,
}

impl NamingConvention {
    /// Characters allowed in a segment besides letters and digits.
    pub fn additional_valid_characters(&self) -> &'static [char] {
        match self {
            NamingConvention::Modern => MODERN_ADDITIONAL_CHARACTERS,
            NamingConvention::Legacy => LEGACY_ADDITIONAL_CHARACTERS,
        }
    }

    pub fn lowercases_output(&self) -> bool {
        matches!(self, NamingConvention::Legacy)
    }

    /// Whether `c` may appear inside a single name segment.
    ///
    /// Letters (`L*`), decimal digits (`Nd`) and the additional characters qualify.
    /// Names are judged per UTF-16 code unit, so nothing outside the Basic Multilingual
    /// Plane is valid. `/` is never valid here: it only separates segments.
    pub fn is_valid_character(&self, c: char) -> bool {
        if self.additional_valid_characters().contains(&c) {
            return true;
        }
        if c.len_utf16() > 1 {
            return false;
        }

        matches!(
            get_general_category(c),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
                | GeneralCategory::DecimalNumber
        )
    }
}

impl Display for NamingConvention {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NamingConvention::Modern => write!(f, "modern"),
            NamingConvention::Legacy => write!(f, "legacy"),
        }
    }
}
