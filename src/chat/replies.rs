pub const GREETING: &[&str] = &["Hello! I'm your AI traffic assistant. You can ask me about:
- Current traffic conditions
- Accident reports and road closures
- Best routes and travel times
- Construction updates
- Weather impacts on traffic
- Parking availability
- Speed limits and road regulations
How can I help you today?"];

pub const HELP: &[&str] = &["I can help you with various traffic-related questions such as:
1. \"How's the traffic on Highway 101?\"
2. \"What's the fastest route to downtown?\"
3. \"Are there any accidents on my route?\"
4. \"Is there construction work affecting traffic?\"
5. \"What's the current travel time to the airport?\"
6. \"Where can I find parking downtown?\"
7. \"Are there any road closures today?\"
8. \"What's the speed limit on this road?\"
Feel free to ask any of these questions!"];

pub const FAREWELL: &[&str] =
    &["You're welcome! Feel free to ask if you need any more traffic information. Safe travels!"];

pub const WEATHER: &[&str] = &[
    "Current weather conditions are affecting traffic flow. Rain is causing slower speeds on all major highways.",
    "Snow removal operations are in progress on the interstate. Expect delays and drive carefully.",
    "Strong winds are affecting high-profile vehicles on the bridge. Use caution when crossing.",
    "Weather is clear and not impacting traffic at this time. All routes are operating normally.",
];

pub const PARKING: &[&str] = &[
    "Downtown parking garages are currently at 70% capacity. The best availability is at the Central Garage on Main Street.",
    "Street parking is free after 6 PM in the business district. Several spots are available near the restaurant area.",
    "The stadium parking lot is full due to the event. Consider using the shuttle service from the Park & Ride.",
    "Multiple parking options are available downtown. Covered garage rates start at $2/hour.",
];

pub const SPEED_LIMIT: &[&str] = &[
    "The speed limit on this stretch of highway is 65 mph. Construction zones reduce this to 45 mph.",
    "Downtown areas have a standard speed limit of 25 mph. School zones are restricted to 15 mph during school hours.",
    "The expressway speed limit is 55 mph. Variable speed limits may be in effect during adverse conditions.",
    "This residential area has a speed limit of 30 mph. Please drive carefully as there are many pedestrians.",
];

pub const INCIDENT: &[&str] = &[
    "There's a minor accident reported on I-95 northbound near exit 23. Emergency vehicles are on scene, and traffic is moving slowly in the right lane.",
    "A vehicle breakdown has been reported on the downtown bridge. The right shoulder is blocked, causing minor delays of about 5-10 minutes.",
    "There are no major incidents reported in your area at this time. Traffic is flowing normally on all main routes.",
    "A multi-vehicle accident has been cleared from Highway 101, but residual delays of about 15 minutes remain while traffic returns to normal.",
];

pub const CONSTRUCTION: &[&str] = &[
    "Major construction work is ongoing on Highway 101 between exits 25-30. Expect lane closures and delays during non-peak hours.",
    "Bridge maintenance is scheduled for tonight from 10 PM to 5 AM. Plan alternate routes during these hours.",
    "Road widening project on Main Street is causing lane restrictions. Work is expected to continue for the next two weeks.",
    "Construction at the downtown intersection is causing delays. Workers are on site from 9 AM to 3 PM on weekdays.",
];

pub const ROUTE: &[&str] = &[
    "Based on current conditions, the fastest route would be via I-95 and the downtown exit. Estimated travel time is 22 minutes.",
    "I recommend taking the parkway to avoid the construction on Main Street. This alternative route will add about 2 miles but save you approximately 15 minutes.",
    "The quickest route right now would be Highway 101 to Junction 25, then local roads. This avoids the congestion reported on the interstate.",
    "Several routes are available. The shortest is via downtown, but taking the ring road would be 5 minutes faster due to better traffic flow, despite being 3 miles longer.",
];

pub const CONDITIONS: &[&str] = &[
    "Traffic is currently flowing smoothly on most major highways. There are minor delays at the downtown exits during this rush hour.",
    "Moderate congestion is reported on the northbound interstate with speeds averaging 35mph. The southbound lanes are moving at normal speeds.",
    "Traffic is heavier than usual today due to the event at the convention center. Expect delays of 15-20 minutes if traveling through downtown.",
    "Current conditions show light traffic across the network. All major routes are moving at or near the speed limit.",
];

pub const GENERAL_TRAFFIC: &[&str] = &["Current traffic conditions are moderate with typical delays during this time of day. Can you be more specific about what information you need or which area you're interested in?"];

pub const FALLBACK: &[&str] = &["I'm your AI traffic assistant. You can ask me about current traffic conditions, routes, travel times, accidents, construction, parking, weather impacts, or speed limits. How can I assist you with your journey today?"];
