#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod list_tests;

#[cfg(test)]
mod error_tests;

#[cfg(test)]
mod document_tests;

#[cfg(test)]
mod workflow_tests;

#[cfg(test)]
mod host_tests;
