use crate::movie::MovieRecord;

/// The default collection inserted on first run
pub fn sample_movies() -> Vec<MovieRecord> {
    vec![
        sample(
            "tt0816692",
            "https://m.media-amazon.com/images/M/MV5BYzdjMDAxZGItMjI2My00ODA1LTlkNzItOWFjMDU5ZDJlYWY3XkEyXkFqcGc@._V1_SX300.jpg",
            "Interstellar",
            "2014",
            &["Adventure", "Drama", "Sci-Fi"],
            "When Earth becomes uninhabitable in the future, a farmer and ex-NASA pilot, Joseph Cooper, is tasked to pilot a spacecraft, along with a team of researchers, to find a new planet for humans.",
            "A mind-bending journey through space and time.",
        ),
        sample(
            "tt0111161",
            "https://m.media-amazon.com/images/M/MV5BMDAyY2FhYjctNDc5OS00MDNlLThiMGUtY2UxYWVkNGY2ZjljXkEyXkFqcGc@._V1_SX300.jpg",
            "The Shawshank Redemption",
            "1994",
            &["Drama"],
            "A banker convicted of uxoricide forms a friendship over a quarter century with a hardened convict, while maintaining his innocence and trying to remain hopeful through simple compassion.",
            "A timeless tale of hope and resilience.",
        ),
        sample(
            "tt0468569",
            "https://m.media-amazon.com/images/M/MV5BMTMxNTMwODM0NF5BMl5BanBnXkFtZTcwODAyMTk2Mw@@._V1_SX300.jpg",
            "The Dark Knight",
            "2008",
            &["Action", "Crime", "Drama"],
            "When a menace known as the Joker wreaks havoc and chaos on the people of Gotham, Batman, James Gordon and Harvey Dent must work together to put an end to the madness.",
            "An epic conclusion to Christopher Nolan's Batman trilogy.",
        ),
        sample(
            "tt0110912",
            "https://m.media-amazon.com/images/M/MV5BYTViYTE3ZGQtNDBlMC00ZTAyLTkyODMtZGRiZDg0MjA2YThkXkEyXkFqcGc@._V1_SX300.jpg",
            "Pulp Fiction",
            "1994",
            &["Crime", "Drama"],
            "The lives of two mob hitmen, a boxer, a gangster and his wife, and a pair of diner bandits intertwine in four tales of violence and redemption.",
            "A cult classic with unforgettable dialogue.",
        ),
        sample(
            "tt7126948",
            "https://m.media-amazon.com/images/M/MV5BYTdkYjI0M2ItMmUxZi00YjU1LTgwM2ItODgxNDY0ODZhZDQzXkEyXkFqcGc@._V1_SX300.jpg",
            "Wonder Woman 1984",
            "2020",
            &["Action", "Adventure", "Fantasy"],
            "Wonder Woman finds herself battling two opponents, Maxwell Lord, a shrewd entrepreneur, and Barbara Minerva, a friend-turned-foe. Meanwhile, she also ends up crossing paths with her love interest.",
            "A vibrant and action-packed sequel.",
        ),
        sample(
            "tt4154756",
            "https://m.media-amazon.com/images/M/MV5BMjMxNjY2MDU1OV5BMl5BanBnXkFtZTgwNzY1MTUwNTM@._V1_SX300.jpg",
            "Avengers: Infinity War",
            "2018",
            &["Action", "Adventure", "Sci-Fi"],
            "The Avengers and their allies must be willing to sacrifice all in an attempt to defeat the powerful Thanos before his blitz of devastation and ruin puts an end to the universe.",
            "An epic crossover event that redefined superhero movies.",
        ),
        sample(
            "tt10838180",
            "https://m.media-amazon.com/images/M/MV5BMDMyNDIzYzMtZTMyMy00NjUyLWI3Y2MtYzYzOGE1NzQ1MTBiXkEyXkFqcGc@._V1_SX300.jpg",
            "The Matrix Resurrections",
            "2021",
            &["Action", "Sci-Fi"],
            "Return to a world of two realities: one, everyday life; the other, what lies behind it. To find out if his reality is a construct, to truly know himself, Mr. Anderson will have to choose to follow the white rabbit once more.",
            "A thought-provoking sequel that explores the nature of reality.",
        ),
        sample(
            "tt1375666",
            "https://m.media-amazon.com/images/M/MV5BMjAxMzY3NjY4MF5BMl5BanBnXkFtZTcwODI5OTM0Mw@@._V1_SX300.jpg",
            "Inception",
            "2010",
            &["Action", "Adventure", "Sci-Fi"],
            "A thief who steals corporate secrets through the use of dream-sharing technology is given the inverse task of planting an idea into the mind of a CEO.",
            "A visually stunning and mind-bending thriller.",
        ),
        sample(
            "tt0133093",
            "https://m.media-amazon.com/images/M/MV5BNzQzOTk3NjAtNDQxZi00ZjQ5LWFmNTEtODM1ZTAwZDJlYjYzXkEyXkFqcGc@._V1_SX300.jpg",
            "The Matrix",
            "1999",
            &["Action", "Sci-Fi"],
            "A computer hacker learns from mysterious rebels about the true nature of his reality and his role in the war against its controllers.",
            "A groundbreaking sci-fi classic.",
        ),
        sample(
            "tt0109830",
            "https://m.media-amazon.com/images/M/MV5BNWIwODRlYzUtYjYwZi00ZTAwLTg2YjMtYjQzYjYzYjYzYjYzXkEyXkFqcGc@._V1_SX300.jpg",
            "Forrest Gump",
            "1994",
            &["Drama", "Romance"],
            "The presidencies of Kennedy and Johnson, the Vietnam War, and other history unfold through the perspective of an Alabama man with an IQ of 75.",
            "A heartwarming story of an extraordinary life.",
        ),
        sample(
            "tt0120737",
            "https://m.media-amazon.com/images/M/MV5BN2EyZjM3NzUtYTAwZi00ZjQ5LWFmNTEtODM1ZTAwZDJlYjYzXkEyXkFqcGc@._V1_SX300.jpg",
            "The Lord of the Rings: The Fellowship of the Ring",
            "2001",
            &["Action", "Adventure", "Drama"],
            "A meek Hobbit from the Shire and eight companions set out on a journey to destroy the powerful One Ring and save Middle-earth.",
            "An epic fantasy adventure.",
        ),
        sample(
            "tt0088763",
            "https://m.media-amazon.com/images/M/MV5BMjA3N2YwYzUtYjYwZi00ZTAwLTg2YjMtYjQzYjYzYjYzYjYzXkEyXkFqcGc@._V1_SX300.jpg",
            "Back to the Future",
            "1985",
            &["Adventure", "Comedy", "Sci-Fi"],
            "Marty McFly, a 17-year-old high school student, is accidentally sent 30 years into the past in a time-traveling DeLorean invented by his close friend, Doc Brown.",
            "A fun and iconic time-travel adventure.",
        ),
    ]
}

fn sample(
    imdb_id: &str,
    poster: &str,
    title: &str,
    year: &str,
    genres: &[&str],
    plot: &str,
    comment: &str,
) -> MovieRecord {
    MovieRecord::new(
        imdb_id,
        poster,
        title,
        year,
        genres.iter().map(|g| g.to_string()).collect(),
        plot,
    )
    .with_comment(comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_movies_have_unique_ids() {
        let movies = sample_movies();
        let ids: HashSet<&str> = movies.iter().map(|m| m.imdb_id.as_str()).collect();
        assert_eq!(ids.len(), movies.len());
        assert_eq!(movies.len(), 12);
    }

    #[test]
    fn test_sample_movies_are_not_favorites() {
        assert!(sample_movies().iter().all(|m| !m.is_favorite));
        assert!(sample_movies().iter().all(|m| m.comment.is_some()));
    }
}
