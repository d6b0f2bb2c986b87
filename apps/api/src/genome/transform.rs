//! Entity transformers: upstream records to canonical records.
//!
//! Every function here is total. Missing or empty upstream values fall back to
//! documented defaults; the only filtering step is dropping experience records
//! that have no title.

use chrono::{DateTime, Utc};

use crate::genome::models::{
    Coordinates, Experience, ExperienceType, Link, LinkType, Location, Organization, PartialDate,
    Person, DEFAULT_THEME, NO_HEADLINE, UNKNOWN_HANDLE, UNKNOWN_LOCATION, UNKNOWN_NAME,
    UNKNOWN_ORGANIZATION,
};
use crate::genome::raw::{
    FlexId, FlexNumber, RawExperience, RawLink, RawLocation, RawOrganization, RawPerson,
};

/// Treats empty and whitespace-only strings as absent.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn present_owned(value: Option<String>) -> Option<String> {
    present(value.as_ref()).map(String::from)
}

pub fn transform_person(person: &RawPerson, now: DateTime<Utc>) -> Person {
    let member_since = person
        .created
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now);

    Person {
        name: present(person.name.as_ref())
            .unwrap_or(UNKNOWN_NAME)
            .to_string(),
        username: present(person.public_id.as_ref())
            .unwrap_or(UNKNOWN_HANDLE)
            .to_string(),
        professional_headline: present(person.professional_headline.as_ref())
            .unwrap_or(NO_HEADLINE)
            .to_string(),
        bio: present_owned(person.summary_of_bio.clone()),
        location: person.location.as_ref().map(transform_location),
        profile_picture: present_owned(person.picture.clone()),
        profile_thumbnail: present_owned(person.picture_thumbnail.clone()),
        verified: person.verified.unwrap_or(false),
        is_test: person.is_test.unwrap_or(false),
        completion: person
            .completion
            .filter(|c| c.is_finite())
            .unwrap_or(0.0)
            .clamp(0.0, 1.0),
        member_since,
        links: transform_links(&person.links),
        theme: present(person.theme.as_ref())
            .unwrap_or(DEFAULT_THEME)
            .to_string(),
    }
}

pub fn transform_location(location: &RawLocation) -> Location {
    let name = present(location.name.as_ref())
        .or_else(|| present(location.short_name.as_ref()))
        .or_else(|| present(location.country.as_ref()))
        .unwrap_or(UNKNOWN_LOCATION)
        .to_string();

    let coordinates = match (location.latitude, location.longitude) {
        (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
        _ => None,
    };

    Location {
        name,
        country: present_owned(location.country.clone()),
        country_code: present_owned(location.country_code.clone()),
        coordinates,
        timezone: present_owned(location.timezone.clone()),
    }
}

pub fn transform_links(links: &[RawLink]) -> Vec<Link> {
    links.iter().map(transform_link).collect()
}

pub fn transform_link(link: &RawLink) -> Link {
    let name = link.name.clone().unwrap_or_default();
    let url = link.address.clone().unwrap_or_default();
    Link {
        id: link.id.clone().map(FlexId::into_string),
        link_type: classify_link(&name, &url),
        name,
        url,
        verified: false,
    }
}

/// Classifies a link by case-insensitive substring match. First rule wins.
pub fn classify_link(name: &str, url: &str) -> LinkType {
    let name = name.to_lowercase();
    let url = url.to_lowercase();
    let name_has = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

    if name_has(&["linkedin"]) || url.contains("linkedin.com") {
        LinkType::Linkedin
    } else if name_has(&["github"]) || url.contains("github.com") {
        LinkType::Github
    } else if name_has(&["twitter"]) || url.contains("twitter.com") || url.contains("x.com") {
        LinkType::Twitter
    } else if name_has(&["portfolio", "behance", "dribbble"]) {
        LinkType::Portfolio
    } else if name_has(&["website", "blog", "personal"]) {
        LinkType::Website
    } else {
        LinkType::Other
    }
}

/// `None` is a valid state here: the record simply has no organization.
pub fn transform_organization(org: Option<&RawOrganization>) -> Option<Organization> {
    let org = org?;
    Some(Organization {
        id: org.id.clone().map(FlexId::into_string),
        name: present(org.name.as_ref())
            .unwrap_or(UNKNOWN_ORGANIZATION)
            .to_string(),
        logo: present_owned(org.picture.clone()),
        public_id: present_owned(org.public_id.clone()),
        website: present_owned(org.website.clone()),
    })
}

fn part(value: Option<&FlexNumber>) -> Option<i32> {
    value.and_then(FlexNumber::as_i32)
}

fn is_set(value: Option<&FlexNumber>) -> bool {
    value.is_some_and(FlexNumber::is_set)
}

/// Converts one upstream record. Returns `None` when the record has no title.
/// `index` is the record's position in the combined input and backs the id of
/// records that arrive without one.
pub fn transform_experience(exp: &RawExperience, index: usize) -> Option<Experience> {
    let title = present(exp.name.as_ref())?.to_string();

    let experience_type = exp
        .category
        .as_deref()
        .map(ExperienceType::from_category)
        .unwrap_or(ExperienceType::Job);

    let id = exp
        .id
        .clone()
        .map(FlexId::into_string)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| format!("experience-{index}"));

    let end_month = part(exp.to_month.as_ref());
    let end_year = part(exp.to_year.as_ref());

    Some(Experience {
        id,
        experience_type,
        title,
        organization: transform_organization(exp.organizations.first()),
        description: present_owned(exp.additional_info.clone()),
        responsibilities: exp.responsibilities.clone(),
        start_date: PartialDate::from_parts(
            part(exp.from_month.as_ref()),
            part(exp.from_year.as_ref()),
        ),
        end_date: PartialDate::from_parts(end_month, end_year),
        current: !is_set(exp.to_month.as_ref()) && !is_set(exp.to_year.as_ref()),
        highlighted: exp.highlighted.unwrap_or(false),
        skills: exp
            .strengths
            .iter()
            .filter_map(|s| present(s.name.as_ref()).map(String::from))
            .collect(),
        media: exp.media.iter().filter(|m| m.is_object()).cloned().collect(),
        verifications: exp.verifications.unwrap_or(0),
        recommendations: exp.recommendations.unwrap_or(0),
    })
}

/// Transforms every titled record, then orders them most recent first:
/// descending end year (no end year counts as the present), then descending
/// start year. Ties keep input order.
pub fn transform_experiences<'a>(
    experiences: impl IntoIterator<Item = &'a RawExperience>,
) -> Vec<Experience> {
    let mut out: Vec<Experience> = experiences
        .into_iter()
        .enumerate()
        .filter_map(|(i, exp)| transform_experience(exp, i))
        .collect();

    out.sort_by(|a, b| {
        let a_end = a.end_year().unwrap_or(i32::MAX);
        let b_end = b.end_year().unwrap_or(i32::MAX);
        b_end
            .cmp(&a_end)
            .then_with(|| b.start_year().unwrap_or(0).cmp(&a.start_year().unwrap_or(0)))
    });
    out
}
