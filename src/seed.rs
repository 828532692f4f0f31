//! Sample employers and open jobs loaded at boot when `SEED_SAMPLE_DATA` is on.

use time::{Duration, OffsetDateTime};
use tracing::info;

use crate::{
    auth::{
        password::hash_password,
        repo_types::{User, UserRepo, UserType},
    },
    jobs::repo_types::{Job, JobRepo, NewJob},
};

pub const SAMPLE_PASSWORD: &str = "password123";

// id, name, email, location, company_size, industry
const EMPLOYERS: [(&str, &str, &str, &str, &str, &str); 5] = [
    (
        "e1",
        "Tata Construction Ltd",
        "hiring@tataconstruction.com",
        "Mumbai, Maharashtra",
        "Large Enterprise",
        "Construction",
    ),
    (
        "e2",
        "Infosys Campus Services",
        "facilities@infosys.com",
        "Bangalore, Karnataka",
        "Large Enterprise",
        "Technology",
    ),
    (
        "e3",
        "Sai Hospitality Services",
        "jobs@saihospitality.com",
        "Hyderabad, Telangana",
        "Medium Business",
        "Hospitality",
    ),
    (
        "e4",
        "Godrej Properties",
        "careers@godrejproperties.com",
        "Delhi, NCR",
        "Large Enterprise",
        "Real Estate",
    ),
    (
        "e5",
        "Local Farms Cooperative",
        "work@localfarms.org",
        "Pune, Maharashtra",
        "Small Business",
        "Agriculture",
    ),
];

struct SampleJob {
    id: &'static str,
    employer_id: &'static str,
    title: &'static str,
    description: &'static str,
    location: &'static str,
    skills: &'static [&'static str],
    pay_rate: &'static str,
    duration: &'static str,
    days_old: i64,
}

const JOBS: [SampleJob; 8] = [
    SampleJob {
        id: "j1",
        employer_id: "e1",
        title: "Construction Workers Needed for Township Project",
        description: "We are looking for experienced construction workers for our upcoming \
            township project in Mumbai suburbs. Skills required include masonry, carpentry, \
            and painting. Daily wages provided with meals. 3-month contract with possibility \
            of extension.",
        location: "Thane, Maharashtra",
        skills: &["Carpentry", "Masonry", "Painting"],
        pay_rate: "600",
        duration: "3 months",
        days_old: 5,
    },
    SampleJob {
        id: "j2",
        employer_id: "e2",
        title: "Campus Maintenance Staff",
        description: "Infosys Bangalore campus is hiring maintenance staff for electrical work, \
            plumbing, and gardening. Full-time positions with benefits including health \
            insurance, PF, and on-campus accommodation.",
        location: "Electronic City, Bangalore",
        skills: &["Electrical Work", "Plumbing", "Gardening"],
        pay_rate: "22000",
        duration: "Permanent",
        days_old: 10,
    },
    SampleJob {
        id: "j3",
        employer_id: "e3",
        title: "Hotel Kitchen Assistants and Cleaners",
        description: "5-star hotel in Hyderabad looking for kitchen assistants and cleaning \
            staff. Experience preferred but not required. Shift work with overtime pay. Meals \
            provided during shifts.",
        location: "Banjara Hills, Hyderabad",
        skills: &["Cooking", "Cleaning"],
        pay_rate: "15000",
        duration: "Permanent",
        days_old: 3,
    },
    SampleJob {
        id: "j4",
        employer_id: "e4",
        title: "Drivers for Corporate Fleet",
        description: "Godrej is hiring experienced drivers for corporate fleet in Delhi NCR. \
            Must have valid commercial license and 3+ years experience. Company transport \
            provided to/from home.",
        location: "Gurgaon, Haryana",
        skills: &["Driving"],
        pay_rate: "18000",
        duration: "Permanent",
        days_old: 7,
    },
    SampleJob {
        id: "j5",
        employer_id: "e5",
        title: "Seasonal Farm Workers",
        description: "Local Farms Cooperative needs farm workers for the upcoming harvest \
            season. Work includes vegetable picking, sorting, and packaging. Transportation \
            provided from Pune city center.",
        location: "Mulshi, Pune",
        skills: &["Farm Work", "Gardening"],
        pay_rate: "450",
        duration: "45 days",
        days_old: 2,
    },
    SampleJob {
        id: "j6",
        employer_id: "e1",
        title: "Security Guards for Residential Complex",
        description: "Tata Housing needs security personnel for our residential complexes in \
            Mumbai. 8-hour shifts (rotating). Previous security experience preferred.",
        location: "Vikhroli, Mumbai",
        skills: &["Security"],
        pay_rate: "16000",
        duration: "Permanent",
        days_old: 8,
    },
    SampleJob {
        id: "j7",
        employer_id: "e2",
        title: "Office Assistants for Data Entry",
        description: "Infosys BPO division requires data entry operators with basic computer \
            knowledge. Day shift only. Training provided.",
        location: "Whitefield, Bangalore",
        skills: &["Data Entry"],
        pay_rate: "16500",
        duration: "6 months",
        days_old: 4,
    },
    SampleJob {
        id: "j8",
        employer_id: "e3",
        title: "Tailors for Uniform Stitching",
        description: "Hotel chain looking for experienced tailors to stitch and repair staff \
            uniforms. Must have experience with industrial sewing machines.",
        location: "Secunderabad, Telangana",
        skills: &["Tailoring"],
        pay_rate: "18000",
        duration: "Permanent",
        days_old: 15,
    },
];

/// Puts the sample employers and jobs into the given stores.
pub fn load(users: &UserRepo, jobs: &JobRepo) -> anyhow::Result<()> {
    let password_hash = hash_password(SAMPLE_PASSWORD)?;

    for (id, name, email, location, size, industry) in EMPLOYERS {
        let mut employer = User::new(
            id.into(),
            name.into(),
            email.into(),
            password_hash.clone(),
            UserType::Employer,
        );
        employer.location = Some(location.into());
        employer.company_size = Some(size.into());
        employer.industry = Some(industry.into());
        users.put(employer);
    }

    let now = OffsetDateTime::now_utc();
    for sample in &JOBS {
        let mut job = Job::new(
            sample.id.into(),
            sample.employer_id.into(),
            NewJob {
                title: sample.title.into(),
                description: sample.description.into(),
                location: sample.location.into(),
                skills_required: sample.skills.iter().map(|s| s.to_string()).collect(),
                pay_rate: Some(sample.pay_rate.into()),
                duration: Some(sample.duration.into()),
            },
        );
        job.created_at = now - Duration::days(sample.days_old);
        jobs.put(job);
    }

    info!(employers = EMPLOYERS.len(), jobs = JOBS.len(), "sample data loaded");
    Ok(())
}
