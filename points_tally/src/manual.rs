/*!

This is the long-form manual for `points_tally` and `cumvotes`.

## Scoring

Each ballot ranks entities (countries, songs, ...) from the most preferred
down. The scoring schedule gives the points of each rank. With the default
schedule `12,10,8,7,6,5,4,3,2,1`, the first choice gets 12 points, the
second 10, and the tenth 1 point. Choices beyond the tenth rank do not score.

Blank choices (empty strings, or only whitespace) keep their rank: the
choice that follows them is still scored at its own position. A ballot is
counted even if it gives no points at all.

## Ballot files

`cumvotes` reads every `.json` file of the votes directory, except the
cumulative output file itself. A ballot file is a JSON object with a `votes`
array:

```json
{
  "user": "someone@example.com",
  "votes": ["Sweden", "Finland", "", "Italy"]
}
```

Other fields are ignored. A `null` choice is treated as blank. Files that
cannot be read, or that do not have this shape, are skipped and reported.

## Cumulative file

After each pass the tally is written to the cumulative file (by default
`cumulativevotes.json`):

```json
{
  "countryPoints": {
    "Finland": 10,
    "Italy": 7,
    "Sweden": 12
  },
  "totalVotes": 1
}
```

The file is rewritten completely at every pass.

## Configuration

`cumvotes` reads `calculate_cumulative.ini` from the working directory (or
the file given with `--config`):

```ini
[settings]
update_interval = 15
votes_directory = .
cumulative_file = cumulativevotes.json
points_system = 12,10,8,7,6,5,4,3,2,1
enable_logging = true
show_timestamps = true
show_vote_details = true
max_countries_display = 10
show_zero_points = false

[output]
show_header = true
show_separator = true
separator_char = -
separator_length = 50
```

All the keys are optional. If the file contains an invalid value, the whole
file is ignored and the defaults are used.

## Running

```bash
cumvotes --once      # one pass, then exit
cumvotes             # one pass every `update_interval` seconds, until Ctrl+C
```

*/
