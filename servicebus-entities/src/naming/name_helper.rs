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

//! Topic naming, sanitizing and queue name validation.

use crate::naming::convention::NamingConvention;
use crate::naming::type_descriptor::TypeDescriptor;
use thiserror::Error;

/// Separates the segments of a multi-part entity name.
pub const SEGMENT_SEPARATOR: char = '/';

const REPLACEMENT_CHARACTER: char = '_';

/// Naming failures. Deterministic, so never worth retrying.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum NamingError {
    #[error(
        "The string '{name}' is not a valid {convention} entity name! Entity names must consist \
         of only letters, digits and {allowed}, and possibly multiple segments of these \
         separated by slash (/)."
    )]
    InvalidEntityName {
        name: String,
        convention: NamingConvention,
        allowed: String,
    },
}

impl NamingError {
    /// The full name that failed validation.
    pub fn name(&self) -> &str {
        match self {
            NamingError::InvalidEntityName { name, .. } => name,
        }
    }
}

/// Naming contract consumed by transports and any other component that needs entity names.
pub trait TopicNameConvention: Send + Sync {
    /// Topic name for events of the given type.
    fn topic_for(&self, event_type: &TypeDescriptor) -> String;

    /// Turns `input` into a valid entity name, keeping `/` segment separators.
    fn sanitize(&self, input: &str) -> String;

    /// Fails if any `/`-separated segment of `queue_name` holds a disallowed character.
    fn validate_queue_name(&self, queue_name: &str) -> Result<(), NamingError>;
}

/// [`TopicNameConvention`] for a fixed [`NamingConvention`].
///
/// ```
/// use servicebus_entities::{EntityNameHelper, TopicNameConvention, TypeDescriptor};
///
/// let modern = EntityNameHelper::default();
/// let legacy = EntityNameHelper::legacy();
/// let event_type = TypeDescriptor::new("Orders.Contracts", "Orders.Contracts.OrderPlaced");
///
/// assert_eq!(
///     modern.topic_for(&event_type),
///     "Orders.Contracts/Orders.Contracts.OrderPlaced"
/// );
/// assert_eq!(
///     legacy.topic_for(&event_type),
///     "orders_contracts_orderplaced__orders_contracts"
/// );
/// assert!(modern.validate_queue_name("billing/invoices-v2").is_ok());
/// assert!(modern.validate_queue_name("billing/invoices v2").is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EntityNameHelper {
    convention: NamingConvention,
}

impl EntityNameHelper {
    pub fn new(convention: NamingConvention) -> Self {
        Self { convention }
    }

    pub fn legacy() -> Self {
        Self::new(NamingConvention::Legacy)
    }

    pub fn convention(&self) -> NamingConvention {
        self.convention
    }

    fn push_sanitized(&self, name: &mut String, c: char) {
        if c == SEGMENT_SEPARATOR {
            name.push(c);
            return;
        }

        if !self.convention.is_valid_character(c) {
            // One replacement per UTF-16 code unit.
            for _ in 0..c.len_utf16() {
                name.push(REPLACEMENT_CHARACTER);
            }
            return;
        }

        if !self.convention.lowercases_output() {
            name.push(c);
            return;
        }

        // 'İ' lowercases to 'i' plus a combining dot; only the letter is kept.
        name.extend(
            c.to_lowercase()
                .filter(|lower| self.convention.is_valid_character(*lower)),
        );
    }

    fn allowed_characters_description(&self) -> String {
        self.convention
            .additional_valid_characters()
            .iter()
            .map(|c| format!("'{c}'"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TopicNameConvention for EntityNameHelper {
    fn topic_for(&self, event_type: &TypeDescriptor) -> String {
        match self.convention {
            NamingConvention::Modern => {
                let assembly_name = self.sanitize(event_type.assembly_name());
                let type_name = self.sanitize(event_type.full_name());

                format!("{assembly_name}{SEGMENT_SEPARATOR}{type_name}")
            }
            NamingConvention::Legacy => {
                self.sanitize(&event_type.simple_assembly_qualified_name())
            }
        }
    }

    fn sanitize(&self, input: &str) -> String {
        let mut name = String::with_capacity(input.len());
        for c in input.chars() {
            self.push_sanitized(&mut name, c);
        }
        name
    }

    fn validate_queue_name(&self, queue_name: &str) -> Result<(), NamingError> {
        let all_segments_valid = queue_name.split(SEGMENT_SEPARATOR).all(|segment| {
            segment
                .chars()
                .all(|c| self.convention.is_valid_character(c))
        });

        if all_segments_valid {
            return Ok(());
        }

        Err(NamingError::InvalidEntityName {
            name: queue_name.to_string(),
            convention: self.convention,
            allowed: self.allowed_characters_description(),
        })
    }
}
