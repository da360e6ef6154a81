use crate::course::CourseId;

/// Returns the cache key for a single course.
pub fn course_key(course_id: CourseId) -> String {
    format!("course:{}", course_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_id() -> CourseId {
        CourseId::parse("00000000-0000-0000-0000-000000000000").unwrap()
    }

    #[test]
    fn test_course_key() {
        let key = course_key(test_id());
        assert_eq!(key, "course:00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_course_key_is_deterministic() {
        let id = CourseId::generate();
        assert_eq!(course_key(id), course_key(id));
    }
}
