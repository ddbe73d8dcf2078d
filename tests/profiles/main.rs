mod support;

mod profile_regeneration;
mod profile_submission;
